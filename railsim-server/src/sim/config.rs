//! Simulation settings.

/// Configuration parameters for track sampling and the kinematic run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Spacing of track samples along the line (metres).
    pub sample_interval_m: f64,

    /// Samples either side of a point used to measure curvature.
    /// Samples this close to either end of a leg get no curve restriction.
    pub curvature_window: usize,

    /// Lowest curve speed limit ever imposed (km/h).
    pub min_ceiling_kmh: f64,

    /// Integration step (seconds).
    pub time_step_s: f64,

    /// A single leg run is abandoned after this many hours.
    pub max_run_hours: f64,

    /// Distance short of the leg end that counts as arrived (metres),
    /// provided the train is slower than `arrival_speed_kmh`.
    pub arrival_tolerance_m: f64,

    pub arrival_speed_kmh: f64,

    /// Dwell applied to stops without an explicit one (seconds).
    pub default_dwell_s: f64,
}

impl SimConfig {
    /// Run time cap in seconds.
    pub fn max_run_s(&self) -> f64 {
        self.max_run_hours * 3600.0
    }

    /// Same settings with a different default dwell.
    pub fn with_default_dwell(mut self, dwell_s: f64) -> Self {
        self.default_dwell_s = dwell_s;
        self
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sample_interval_m: 25.0,
            curvature_window: 3,
            min_ceiling_kmh: 25.0,
            time_step_s: 0.5,
            max_run_hours: 10.0,
            arrival_tolerance_m: 2.0,
            arrival_speed_kmh: 1.0,
            default_dwell_s: 20.0,
        }
    }
}
