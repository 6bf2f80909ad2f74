//! Network construction settings.

/// Configuration parameters for network construction.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Two station points with the same label closer than this (metres)
    /// are the same station.
    pub same_station_threshold_m: f64,
}

impl NetworkConfig {
    /// Create a new configuration with the given threshold.
    pub fn new(same_station_threshold_m: f64) -> Self {
        Self {
            same_station_threshold_m,
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            same_station_threshold_m: 500.0,
        }
    }
}
