//! Fixed-step running simulation.

use tracing::warn;

use crate::domain::VehicleSpec;

use super::config::SimConfig;
use super::sampler::TrackSample;

/// Speed above which traction effort starts to fall off (km/h).
const TRACTION_KNEE_KMH: f64 = 35.0;

/// Speed above which traction falls off a second time (km/h).
const TRACTION_SECOND_KNEE_KMH: f64 = 100.0;

/// Fraction of rated acceleration available at `speed_kmh`.
fn traction_ratio(speed_kmh: f64) -> f64 {
    let mut ratio = 1.0;
    if speed_kmh > TRACTION_KNEE_KMH {
        ratio = TRACTION_KNEE_KMH / speed_kmh;
    }
    if speed_kmh > TRACTION_SECOND_KNEE_KMH {
        ratio *= TRACTION_SECOND_KNEE_KMH / speed_kmh;
    }
    ratio
}

/// Run a train from rest over braked samples and return the elapsed time
/// in seconds.
///
/// The leg ends at the last sample's distance. Each step the train aims
/// for the pattern speed of the sample it has most recently passed,
/// braking at the vehicle's service rate when above it and accelerating
/// (with traction fall-off at speed) when below. The run stops on reaching
/// the end, on crawling to a halt within the arrival tolerance, or at the
/// configured time cap.
pub fn run(samples: &[TrackSample], vehicle: &VehicleSpec, config: &SimConfig) -> f64 {
    let Some(last) = samples.last() else {
        return 0.0;
    };
    let total = last.distance_m;
    let dt = config.time_step_s;
    let cap = config.max_run_s();
    let (acc, dec) = (vehicle.acc_ms2(), vehicle.dec_ms2());

    let mut t = 0.0;
    let mut x = 0.0;
    let mut v_kmh: f64 = 0.0;
    let mut current = 0;

    while x < total && t < cap {
        while current + 1 < samples.len() && samples[current + 1].distance_m < x {
            current += 1;
        }
        let target = samples[current].pattern_kmh;

        let mut v_ms = v_kmh / 3.6;
        if v_kmh > target {
            v_ms -= dec * dt;
        } else if v_kmh < target {
            v_ms += acc * traction_ratio(v_kmh) * dt;
        }
        v_ms = v_ms.max(0.0);

        x += v_ms * dt;
        v_kmh = v_ms * 3.6;
        t += dt;

        if x >= total - config.arrival_tolerance_m && v_kmh < config.arrival_speed_kmh {
            break;
        }
    }

    if t >= cap {
        warn!(distance_m = total, reached_m = x, "Run hit the time cap");
    }
    t
}
