//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{StopPlan, VehicleSpec, format_mm_ss};
use crate::geo::Coord;
use crate::network::Network;
use crate::route::{CostModel, Route, RouteRequest};
use crate::sim::{LegReport, Totals};

/// Request to find a route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteBody {
    pub origin: String,
    pub destination: String,

    /// Optional station to pass through. An empty string means none.
    #[serde(default)]
    pub via: Option<String>,

    /// Lines to stay off where possible
    #[serde(default)]
    pub avoid_lines: Vec<String>,

    /// Lines to favour
    #[serde(default)]
    pub prefer_lines: Vec<String>,

    /// Avoid retracing origin→via track on the way from via to destination
    #[serde(default)]
    pub no_repeat: bool,
}

impl RouteBody {
    /// Convert into a route query.
    pub fn to_request(&self) -> RouteRequest {
        let mut request = RouteRequest::new(&self.origin, &self.destination)
            .with_cost(CostModel::new(
                self.avoid_lines.iter().cloned(),
                self.prefer_lines.iter().cloned(),
            ))
            .no_repeat(self.no_repeat);
        if let Some(via) = self.via.as_deref().filter(|v| !v.trim().is_empty()) {
            request = request.with_via(via);
        }
        request
    }
}

/// Vehicle chosen for a simulation: a catalogue name or inline figures.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VehicleChoice {
    Named(String),
    Custom(VehicleSpec),
}

/// A requested stop on the route.
#[derive(Debug, Clone, Deserialize)]
pub struct StopBody {
    /// Position in the route's station list
    pub index: usize,

    /// Dwell in seconds; the default dwell applies when absent
    #[serde(default)]
    pub dwell_s: Option<f64>,
}

/// Request to simulate a journey.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulateBody {
    #[serde(flatten)]
    pub route: RouteBody,

    pub vehicle: VehicleChoice,

    /// Stopping pattern. Calls at every station when absent.
    #[serde(default)]
    pub stops: Option<Vec<StopBody>>,

    /// Dwell for stops without their own (seconds)
    #[serde(default)]
    pub default_dwell_s: Option<f64>,
}

impl SimulateBody {
    /// Stop plan for a route of `route_len` stations.
    pub fn stop_plan(&self, route_len: usize) -> StopPlan {
        match &self.stops {
            Some(stops) => stops.iter().map(|s| (s.index, s.dwell_s)).collect(),
            None => StopPlan::all_stations(route_len),
        }
    }
}

/// A line and its stations.
#[derive(Debug, Serialize)]
pub struct LineView {
    pub name: String,
    pub stations: Vec<String>,
}

/// Response describing the loaded network.
#[derive(Debug, Serialize)]
pub struct NetworkResponse {
    pub title: String,

    /// All station names, sorted
    pub stations: Vec<String>,

    pub lines: Vec<LineView>,
}

impl NetworkResponse {
    pub fn from_network(title: &str, network: &Network) -> Self {
        let name = |idx| network.station_id(idx).to_string();
        Self {
            title: title.to_owned(),
            stations: network
                .sorted_station_ids()
                .into_iter()
                .map(|s| s.to_string())
                .collect(),
            lines: network
                .lines()
                .iter()
                .map(|l| LineView {
                    name: l.name.clone(),
                    stations: l.stations.iter().map(|s| name(*s)).collect(),
                })
                .collect(),
        }
    }
}

/// A catalogue entry.
#[derive(Debug, Serialize)]
pub struct VehicleView {
    pub name: String,
    #[serde(flatten)]
    pub spec: VehicleSpec,
}

/// Response listing the vehicle catalogue.
#[derive(Debug, Serialize)]
pub struct VehiclesResponse {
    pub vehicles: Vec<VehicleView>,
}

/// One hop of a route.
#[derive(Debug, Serialize)]
pub struct HopView {
    pub from: String,
    pub to: String,
    pub line: String,
    pub distance_km: f64,

    /// Track geometry in the direction of travel
    pub points: Vec<Coord>,
}

/// Response describing a selected route.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub stations: Vec<String>,

    /// Lines used, consecutive repeats collapsed
    pub used_lines: Vec<String>,

    pub distance_km: f64,
    pub hops: Vec<HopView>,
}

impl RouteResponse {
    pub fn from_route(network: &Network, route: &Route) -> Self {
        let geometry = route.hop_geometry(network);
        let hops = route
            .hops()
            .iter()
            .zip(geometry)
            .map(|(hop, points)| {
                let edge = network.edge(hop.edge);
                HopView {
                    from: network.station_id(hop.from).to_string(),
                    to: network.station_id(hop.to).to_string(),
                    line: edge.line.clone(),
                    distance_km: round2(edge.length_m / 1000.0),
                    points,
                }
            })
            .collect();

        Self {
            stations: route
                .station_ids(network)
                .into_iter()
                .map(|s| s.to_string())
                .collect(),
            used_lines: route
                .used_lines(network)
                .into_iter()
                .map(str::to_owned)
                .collect(),
            distance_km: round2(route.distance_m(network) / 1000.0),
            hops,
        }
    }
}

/// Dwell label shown for the final leg.
pub const ARRIVAL_LABEL: &str = "arrival";

/// One simulated leg.
#[derive(Debug, Serialize)]
pub struct LegView {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub run_s: f64,
    pub run: String,

    /// Counted dwell at `to`; zero at the terminus
    pub dwell_s: f64,

    /// `m:ss`, or "arrival" at the terminus
    pub dwell: String,

    pub total_s: f64,
    pub total: String,
}

impl LegView {
    pub fn from_report(leg: &LegReport) -> Self {
        Self {
            from: leg.from.to_string(),
            to: leg.to.to_string(),
            distance_km: leg.distance_km(),
            run_s: leg.run_s,
            run: format_mm_ss(leg.run_s),
            dwell_s: leg.counted_dwell_s(),
            dwell: if leg.terminal {
                ARRIVAL_LABEL.to_owned()
            } else {
                format_mm_ss(leg.dwell_s)
            },
            total_s: leg.total_s(),
            total: format_mm_ss(leg.total_s()),
        }
    }
}

/// Sums over all legs.
#[derive(Debug, Serialize)]
pub struct TotalsView {
    pub distance_km: f64,
    pub run_s: f64,
    pub run: String,
    pub dwell_s: f64,
    pub dwell: String,
    pub total_s: f64,
    pub total: String,
}

impl From<Totals> for TotalsView {
    fn from(t: Totals) -> Self {
        Self {
            distance_km: t.distance_km,
            run_s: t.run_s,
            run: format_mm_ss(t.run_s),
            dwell_s: t.dwell_s,
            dwell: format_mm_ss(t.dwell_s),
            total_s: t.total_s,
            total: format_mm_ss(t.total_s),
        }
    }
}

/// Response for a journey simulation.
#[derive(Debug, Serialize)]
pub struct SimulateResponse {
    pub route: RouteResponse,
    pub vehicle: String,
    pub legs: Vec<LegView>,
    pub totals: TotalsView,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
