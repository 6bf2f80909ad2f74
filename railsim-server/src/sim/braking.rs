//! Braking curve.

use crate::domain::VehicleSpec;

use super::sampler::TrackSample;

/// Fill in `pattern_kmh` so the train can always stop at the end of the
/// leg and slow down in time for every curve ahead.
///
/// Works backwards from a pattern of zero at the last sample. Each earlier
/// sample takes the lower of its ceiling and the speed from which the
/// vehicle's service brake reaches the next sample's pattern.
pub fn apply_braking(samples: &mut [TrackSample], vehicle: &VehicleSpec) {
    let Some(last) = samples.last_mut() else {
        return;
    };
    last.pattern_kmh = 0.0;

    let dec = vehicle.dec_ms2();
    for i in (0..samples.len() - 1).rev() {
        let gap = samples[i + 1].distance_m - samples[i].distance_m;
        let next_ms = samples[i + 1].pattern_kmh / 3.6;
        let allowed_kmh = (next_ms * next_ms + 2.0 * dec * gap).sqrt() * 3.6;
        samples[i].pattern_kmh = allowed_kmh.min(samples[i].ceiling_kmh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coord;

    fn flat(n: usize, ceiling: f64) -> Vec<TrackSample> {
        (0..n)
            .map(|i| TrackSample {
                distance_m: i as f64 * 25.0,
                position: Coord::new(35.0, 139.0),
                ceiling_kmh: ceiling,
                pattern_kmh: ceiling,
            })
            .collect()
    }

    fn emu() -> VehicleSpec {
        VehicleSpec::new(110.0, 3.0, 4.2, 4.5, "EMU").unwrap()
    }

    #[test]
    fn empty_is_noop() {
        let mut samples: Vec<TrackSample> = Vec::new();
        apply_braking(&mut samples, &emu());
        assert!(samples.is_empty());
    }

    #[test]
    fn ends_at_zero_and_rises_backwards() {
        let mut samples = flat(100, 110.0);
        apply_braking(&mut samples, &emu());
        assert_eq!(samples[99].pattern_kmh, 0.0);
        assert!(samples.windows(2).all(|w| w[0].pattern_kmh >= w[1].pattern_kmh));
        assert_eq!(samples[0].pattern_kmh, 110.0);
    }

    #[test]
    fn one_step_matches_kinematics() {
        let mut samples = flat(2, 200.0);
        apply_braking(&mut samples, &emu());
        let dec = 4.2 / 3.6;
        let expected = (2.0 * dec * 25.0f64).sqrt() * 3.6;
        assert!((samples[0].pattern_kmh - expected).abs() < 1e-9);
    }

    #[test]
    fn slows_ahead_of_a_curve() {
        let mut samples = flat(60, 110.0);
        samples[40].ceiling_kmh = 40.0;
        apply_braking(&mut samples, &emu());
        assert_eq!(samples[40].pattern_kmh, 40.0);
        assert!(samples[39].pattern_kmh > 40.0);
        assert!(samples[39].pattern_kmh < 110.0);
        // Free to accelerate again after the curve.
        assert!(samples[45].pattern_kmh > 40.0);
    }
}
