//! Vehicle performance figures.

use serde::{Deserialize, Serialize};

/// Error returned when vehicle figures are out of range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid vehicle spec: {reason}")]
pub struct InvalidVehicle {
    reason: &'static str,
}

/// Performance envelope of a train.
///
/// Speeds are km/h and rates are km/h per second, the units drivers and
/// timetable planners quote. Conversion to SI happens inside the simulator.
///
/// # Examples
///
/// ```
/// use railsim_server::domain::VehicleSpec;
///
/// let emu = VehicleSpec::new(110.0, 3.0, 4.2, 4.5, "Commuter EMU").unwrap();
/// assert_eq!(emu.max_speed_kmh(), 110.0);
///
/// // Zero braking can never stop the train
/// assert!(VehicleSpec::new(110.0, 3.0, 0.0, 4.5, "").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawVehicleSpec")]
pub struct VehicleSpec {
    max_speed_kmh: f64,
    acc_kmh_s: f64,
    dec_kmh_s: f64,
    curve_factor: f64,
    description: String,
}

impl VehicleSpec {
    /// Validate and build a spec. All figures must be finite and positive.
    pub fn new(
        max_speed_kmh: f64,
        acc_kmh_s: f64,
        dec_kmh_s: f64,
        curve_factor: f64,
        description: impl Into<String>,
    ) -> Result<Self, InvalidVehicle> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(max_speed_kmh) {
            return Err(InvalidVehicle {
                reason: "max speed must be positive",
            });
        }
        if !positive(acc_kmh_s) {
            return Err(InvalidVehicle {
                reason: "acceleration must be positive",
            });
        }
        if !positive(dec_kmh_s) {
            return Err(InvalidVehicle {
                reason: "deceleration must be positive",
            });
        }
        if !positive(curve_factor) {
            return Err(InvalidVehicle {
                reason: "curve factor must be positive",
            });
        }

        Ok(Self {
            max_speed_kmh,
            acc_kmh_s,
            dec_kmh_s,
            curve_factor,
            description: description.into(),
        })
    }

    /// Top speed (km/h).
    pub fn max_speed_kmh(&self) -> f64 {
        self.max_speed_kmh
    }

    /// Starting acceleration (km/h/s).
    pub fn acc_kmh_s(&self) -> f64 {
        self.acc_kmh_s
    }

    /// Service braking rate (km/h/s).
    pub fn dec_kmh_s(&self) -> f64 {
        self.dec_kmh_s
    }

    /// Multiplier turning `sqrt(radius)` into a curve speed limit.
    pub fn curve_factor(&self) -> f64 {
        self.curve_factor
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Starting acceleration in m/s².
    pub fn acc_ms2(&self) -> f64 {
        self.acc_kmh_s / 3.6
    }

    /// Braking rate in m/s².
    pub fn dec_ms2(&self) -> f64 {
        self.dec_kmh_s / 3.6
    }
}

/// Wire shape of a vehicle spec, validated into [`VehicleSpec`].
#[derive(Deserialize)]
struct RawVehicleSpec {
    max_speed_kmh: f64,
    acc_kmh_s: f64,
    dec_kmh_s: f64,
    curve_factor: f64,
    #[serde(default)]
    description: String,
}

impl TryFrom<RawVehicleSpec> for VehicleSpec {
    type Error = InvalidVehicle;

    fn try_from(raw: RawVehicleSpec) -> Result<Self, Self::Error> {
        VehicleSpec::new(
            raw.max_speed_kmh,
            raw.acc_kmh_s,
            raw.dec_kmh_s,
            raw.curve_factor,
            raw.description,
        )
    }
}
