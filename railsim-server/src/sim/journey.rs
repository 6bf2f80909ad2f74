//! Multi-leg journeys.
//!
//! A route plus a stopping pattern splits into legs between consecutive
//! stops. Legs are independent: each is sampled, braked and run on its own,
//! so callers may run them in parallel and reassemble the reports in order.

use tracing::{trace, warn};

use crate::domain::{DomainError, StationId, Stop, StopPlan, VehicleSpec};
use crate::geo::Coord;
use crate::network::Network;
use crate::route::Route;

use super::braking::apply_braking;
use super::config::SimConfig;
use super::runner::run;
use super::sampler::sample_track;

/// Everything needed to simulate one leg.
#[derive(Debug, Clone, PartialEq)]
pub struct LegJob {
    pub from: StationId,
    pub to: StationId,
    /// Track from `from` to `to`, oriented in the direction of travel.
    pub points: Vec<Coord>,
    /// Planned dwell at `to` (seconds).
    pub dwell_s: f64,
    /// Whether `to` is the end of the journey.
    pub terminal: bool,
}

impl LegJob {
    /// Simulate the leg. Returns `None` if its geometry is degenerate.
    pub fn run(&self, vehicle: &VehicleSpec, config: &SimConfig) -> Option<LegReport> {
        let mut samples = sample_track(&self.points, vehicle, config);
        let Some(last) = samples.last() else {
            warn!(from = %self.from, to = %self.to, "Skipping leg with no usable track");
            return None;
        };
        let distance_m = last.distance_m;

        apply_braking(&mut samples, vehicle);
        let run_s = run(&samples, vehicle, config);
        trace!(
            from = %self.from,
            to = %self.to,
            samples = samples.len(),
            distance_m,
            run_s,
            "Leg simulated"
        );

        Some(LegReport {
            from: self.from.clone(),
            to: self.to.clone(),
            distance_m,
            run_s,
            dwell_s: self.dwell_s,
            terminal: self.terminal,
        })
    }
}

/// Result of one simulated leg.
#[derive(Debug, Clone, PartialEq)]
pub struct LegReport {
    pub from: StationId,
    pub to: StationId,
    /// Simulated track length (metres).
    pub distance_m: f64,
    /// Running time (seconds).
    pub run_s: f64,
    /// Planned dwell at `to` (seconds).
    pub dwell_s: f64,
    pub terminal: bool,
}

impl LegReport {
    /// Distance in kilometres, rounded to two decimals.
    pub fn distance_km(&self) -> f64 {
        round_km(self.distance_m / 1000.0)
    }

    /// Dwell that counts toward the journey time. Arrival at the terminus
    /// counts as zero.
    pub fn counted_dwell_s(&self) -> f64 {
        if self.terminal { 0.0 } else { self.dwell_s }
    }

    pub fn total_s(&self) -> f64 {
        self.run_s + self.counted_dwell_s()
    }
}

/// Sums over all simulated legs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Totals {
    pub distance_km: f64,
    pub run_s: f64,
    pub dwell_s: f64,
    pub total_s: f64,
}

/// Per-leg results in route order, with skipped legs omitted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JourneyReport {
    pub legs: Vec<LegReport>,
}

impl JourneyReport {
    /// Collect leg outcomes, dropping legs that were skipped.
    pub fn from_legs(legs: impl IntoIterator<Item = Option<LegReport>>) -> Self {
        Self {
            legs: legs.into_iter().flatten().collect(),
        }
    }

    pub fn totals(&self) -> Totals {
        let mut totals = self.legs.iter().fold(Totals::default(), |acc, leg| Totals {
            distance_km: acc.distance_km + leg.distance_km(),
            run_s: acc.run_s + leg.run_s,
            dwell_s: acc.dwell_s + leg.counted_dwell_s(),
            total_s: acc.total_s + leg.total_s(),
        });
        totals.distance_km = round_km(totals.distance_km);
        totals
    }
}

fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

/// Split a route into legs between consecutive resolved stops.
///
/// `stops` must come from [`StopPlan::resolve`] for this route.
pub fn plan_legs(network: &Network, route: &Route, stops: &[Stop]) -> Vec<LegJob> {
    let ids = route.station_ids(network);
    stops
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            let (start, end) = (w[0], w[1]);
            LegJob {
                from: ids[start.index].clone(),
                to: ids[end.index].clone(),
                points: route.span_points(network, start.index, end.index),
                dwell_s: end.dwell_s,
                terminal: i + 2 == stops.len(),
            }
        })
        .collect()
}

/// Simulate a whole journey, one leg after another.
///
/// # Errors
///
/// Fails if the stop plan does not fit the route.
pub fn simulate_journey(
    network: &Network,
    route: &Route,
    plan: &StopPlan,
    vehicle: &VehicleSpec,
    config: &SimConfig,
) -> Result<JourneyReport, DomainError> {
    let stops = plan.resolve(route.len(), config.default_dwell_s)?;
    let jobs = plan_legs(network, route, &stops);
    Ok(JourneyReport::from_legs(
        jobs.iter().map(|job| job.run(vehicle, config)),
    ))
}
