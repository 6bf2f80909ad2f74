//! Application state for the web layer.

use std::sync::Arc;

use crate::network::Network;
use crate::sim::SimConfig;
use crate::vehicles::VehicleCatalog;

/// Shared application state.
///
/// Everything is read-only after start-up, so handlers share it freely.
#[derive(Clone)]
pub struct AppState {
    /// Network built from the loaded map
    pub network: Arc<Network>,

    /// Vehicles selectable by name
    pub vehicles: Arc<VehicleCatalog>,

    /// Simulation settings
    pub config: Arc<SimConfig>,

    /// Map title
    pub title: Arc<str>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        network: Network,
        vehicles: VehicleCatalog,
        config: SimConfig,
        title: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            network: Arc::new(network),
            vehicles: Arc::new(vehicles),
            config: Arc::new(config),
            title: title.into(),
        }
    }
}
