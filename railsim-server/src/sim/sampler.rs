//! Track resampling and curve speed limits.

use crate::domain::VehicleSpec;
use crate::geo::{Coord, curvature_radius, distance};

use super::config::SimConfig;

/// A point on the track at a fixed spacing from the start of the leg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSample {
    /// Distance from the start of the leg (metres).
    pub distance_m: f64,
    pub position: Coord,
    /// Speed limit from curvature and the vehicle's top speed (km/h).
    pub ceiling_kmh: f64,
    /// Highest speed from which the train can still brake for everything
    /// ahead (km/h). Equal to the ceiling until braking is applied.
    pub pattern_kmh: f64,
}

/// Resample a leg polyline at `config.sample_interval_m` and attach curve
/// speed limits.
///
/// Samples sit at `0, interval, 2 * interval, ...` strictly below the
/// polyline length, so the last sample usually falls a little short of the
/// final point. Returns no samples for fewer than two points or a
/// zero-length polyline.
///
/// # Examples
///
/// ```
/// use railsim_server::domain::VehicleSpec;
/// use railsim_server::geo::Coord;
/// use railsim_server::sim::{SimConfig, sample_track};
///
/// let vehicle = VehicleSpec::new(110.0, 3.0, 4.2, 4.5, "EMU").unwrap();
/// let line = [Coord::new(35.0, 139.0), Coord::new(35.01, 139.0)];
/// let samples = sample_track(&line, &vehicle, &SimConfig::default());
///
/// assert_eq!(samples[0].distance_m, 0.0);
/// assert!(samples.windows(2).all(|w| w[0].distance_m < w[1].distance_m));
/// ```
pub fn sample_track(
    points: &[Coord],
    vehicle: &VehicleSpec,
    config: &SimConfig,
) -> Vec<TrackSample> {
    if points.len() < 2 {
        return Vec::new();
    }

    let mut cumulative = Vec::with_capacity(points.len());
    cumulative.push(0.0);
    for w in points.windows(2) {
        let last = cumulative[cumulative.len() - 1];
        cumulative.push(last + distance(w[0], w[1]));
    }
    let total = cumulative[cumulative.len() - 1];
    if !total.is_finite() || total <= 0.0 || config.sample_interval_m <= 0.0 {
        return Vec::new();
    }

    let mut positions = Vec::new();
    let mut segment = 0;
    let mut step = 0usize;
    loop {
        let d = step as f64 * config.sample_interval_m;
        if d >= total {
            break;
        }
        while segment + 2 < cumulative.len() && cumulative[segment + 1] < d {
            segment += 1;
        }
        positions.push((d, interpolate(points, &cumulative, segment, d)));
        step += 1;
    }

    let max_speed = vehicle.max_speed_kmh();
    let clamp = |limit: f64| limit.min(max_speed).max(config.min_ceiling_kmh);
    let w = config.curvature_window;
    let n = positions.len();

    positions
        .iter()
        .enumerate()
        .map(|(i, &(distance_m, position))| {
            let ceiling_kmh = if i < w || i + w >= n {
                clamp(max_speed)
            } else {
                let radius =
                    curvature_radius(positions[i - w].1, position, positions[i + w].1);
                clamp(vehicle.curve_factor() * radius.sqrt())
            };
            TrackSample {
                distance_m,
                position,
                ceiling_kmh,
                pattern_kmh: ceiling_kmh,
            }
        })
        .collect()
}

/// Linear interpolation of lat/lon within `segment` at track distance `d`.
fn interpolate(points: &[Coord], cumulative: &[f64], segment: usize, d: f64) -> Coord {
    let (a, b) = (points[segment], points[segment + 1]);
    let span = cumulative[segment + 1] - cumulative[segment];
    if span <= 0.0 {
        return a;
    }
    let t = ((d - cumulative[segment]) / span).clamp(0.0, 1.0);
    Coord::new(a.lat + (b.lat - a.lat) * t, a.lon + (b.lon - a.lon) * t)
}
