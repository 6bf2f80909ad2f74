use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use railsim_server::map::load_file;
use railsim_server::network::{Network, NetworkConfig};
use railsim_server::sim::SimConfig;
use railsim_server::vehicles::default_catalog;
use railsim_server::web::{AppState, create_router};

/// Address used when `RAILSIM_ADDR` is not set.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Map file is required
    let map_path = std::env::var("RAILSIM_MAP").expect("RAILSIM_MAP must point to a map file");

    let mut network_config = NetworkConfig::default();
    if let Ok(raw) = std::env::var("RAILSIM_SAME_STATION_M") {
        network_config.same_station_threshold_m = raw
            .parse()
            .expect("RAILSIM_SAME_STATION_M must be a number of metres");
    }

    let addr: SocketAddr = std::env::var("RAILSIM_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_owned())
        .parse()
        .expect("RAILSIM_ADDR must be a socket address");

    let map = load_file(&map_path).expect("Failed to load map");
    let network = Network::build(&map.lines, &network_config);
    info!(
        title = %map.title,
        stations = network.station_count(),
        lines = network.lines().len(),
        "Map loaded"
    );

    let state = AppState::new(network, default_catalog(), SimConfig::default(), map.title);
    let app = create_router(state);

    info!("Rail simulator listening on http://{addr}");
    info!("  GET  /health    - Health check");
    info!("  GET  /network   - Stations and lines");
    info!("  GET  /vehicles  - Vehicle catalogue");
    info!("  POST /route     - Select a route");
    info!("  POST /simulate  - Simulate running times");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
