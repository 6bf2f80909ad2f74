//! HTTP route handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use futures::future::join_all;
use serde::de::DeserializeOwned;
use tracing::{error, info, warn};

use crate::domain::{DomainError, InvalidVehicle};
use crate::route::{RouteError, select_route};
use crate::sim::{JourneyReport, plan_legs};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/network", get(network_info))
        .route("/vehicles", get(list_vehicles))
        .route("/route", post(find_route))
        .route("/simulate", post(simulate))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Stations and lines of the loaded map.
async fn network_info(State(state): State<AppState>) -> Json<NetworkResponse> {
    Json(NetworkResponse::from_network(&state.title, &state.network))
}

/// The built-in vehicle catalogue.
async fn list_vehicles(State(state): State<AppState>) -> Json<VehiclesResponse> {
    let vehicles = state
        .vehicles
        .iter()
        .map(|(name, spec)| VehicleView {
            name: name.to_owned(),
            spec: spec.clone(),
        })
        .collect();
    Json(VehiclesResponse { vehicles })
}

/// Parse a JSON body, logging it on failure.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(body), "Rejected request body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Select a route between two stations.
async fn find_route(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RouteResponse>, AppError> {
    let req: RouteBody = parse_body(&body)?;
    let route = select_route(&state.network, &req.to_request())?;
    Ok(Json(RouteResponse::from_route(&state.network, &route)))
}

/// Select a route and simulate running times over it.
///
/// Legs run in parallel on the blocking pool and are reported in route
/// order.
async fn simulate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SimulateResponse>, AppError> {
    let req: SimulateBody = parse_body(&body)?;

    let vehicle = match &req.vehicle {
        VehicleChoice::Named(name) => {
            state
                .vehicles
                .get(name)
                .cloned()
                .ok_or_else(|| AppError::NotFound {
                    message: format!("unknown vehicle: {name}"),
                })?
        }
        VehicleChoice::Custom(spec) => spec.clone(),
    };

    let route = select_route(&state.network, &req.route.to_request())?;
    let default_dwell_s = req
        .default_dwell_s
        .unwrap_or(state.config.default_dwell_s);
    let stops = req
        .stop_plan(route.len())
        .resolve(route.len(), default_dwell_s)?;

    let jobs = plan_legs(&state.network, &route, &stops);
    let vehicle = Arc::new(vehicle);
    let handles = jobs.into_iter().map(|job| {
        let vehicle = Arc::clone(&vehicle);
        let config = Arc::clone(&state.config);
        tokio::task::spawn_blocking(move || job.run(&vehicle, &config))
    });
    let outcomes = join_all(handles)
        .await
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Internal {
            message: format!("leg simulation failed: {e}"),
        })?;

    let report = JourneyReport::from_legs(outcomes);
    let totals = report.totals();
    info!(
        origin = %req.route.origin,
        destination = %req.route.destination,
        legs = report.legs.len(),
        total_s = totals.total_s,
        "Journey simulated"
    );

    Ok(Json(SimulateResponse {
        route: RouteResponse::from_route(&state.network, &route),
        vehicle: vehicle.description().to_owned(),
        legs: report.legs.iter().map(LegView::from_report).collect(),
        totals: totals.into(),
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        let message = e.to_string();
        match e {
            RouteError::UnknownStation(_) | RouteError::NoPath { .. } => {
                AppError::NotFound { message }
            }
            RouteError::SameOriginDestination(_) | RouteError::Empty => {
                AppError::BadRequest { message }
            }
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<InvalidVehicle> for AppError {
    fn from(e: InvalidVehicle) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{LineInput, Network, NetworkConfig, PointInput};
    use crate::sim::SimConfig;
    use crate::vehicles::default_catalog;

    fn test_state() -> AppState {
        let lines = vec![
            LineInput::new(
                "Coast",
                vec![
                    PointInput::station(35.00, 139.0, "Harbour"),
                    PointInput::track(35.01, 139.0),
                    PointInput::station(35.02, 139.0, "Beach"),
                    PointInput::station(35.04, 139.001, "Cape"),
                ],
            ),
            LineInput::new(
                "Hill",
                vec![
                    PointInput::station(35.04, 139.001, "Cape"),
                    PointInput::station(35.05, 139.02, "Summit"),
                ],
            ),
            LineInput::new(
                "Ferry Spur",
                vec![
                    PointInput::station(36.0, 140.0, "Island"),
                    PointInput::station(36.01, 140.0, "Lighthouse"),
                ],
            ),
        ];
        let network = Network::build(&lines, &NetworkConfig::default());
        AppState::new(network, default_catalog(), SimConfig::default(), "Test Railway")
    }

    fn body(json: &str) -> Bytes {
        Bytes::from(json.to_owned())
    }

    fn status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[tokio::test]
    async fn health_is_ok() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn network_lists_sorted_stations() {
        let Json(resp) = network_info(State(test_state())).await;
        assert_eq!(resp.title, "Test Railway");
        assert_eq!(
            resp.stations,
            vec!["Beach", "Cape", "Harbour", "Island", "Lighthouse", "Summit"]
        );
        assert_eq!(resp.lines.len(), 3);
        assert_eq!(resp.lines[0].stations, vec!["Harbour", "Beach", "Cape"]);
    }

    #[tokio::test]
    async fn vehicles_listed() {
        let Json(resp) = list_vehicles(State(test_state())).await;
        assert_eq!(resp.vehicles.len(), default_catalog().len());
        assert_eq!(resp.vehicles[0].name, "Commuter EMU");
    }

    #[tokio::test]
    async fn route_found() {
        let Json(resp) = find_route(
            State(test_state()),
            body(r#"{"origin": "Harbour", "destination": "Summit"}"#),
        )
        .await
        .unwrap();
        assert_eq!(resp.stations, vec!["Harbour", "Beach", "Cape", "Summit"]);
        assert_eq!(resp.used_lines, vec!["Coast", "Hill"]);
        assert_eq!(resp.hops.len(), 3);
        assert_eq!(resp.hops[0].points.len(), 3);
        assert!(resp.distance_km > 6.0);
    }

    #[tokio::test]
    async fn route_errors_map_to_status() {
        let state = test_state();
        let cases = [
            (r#"{"origin": "Harbour", "destination": "Atlantis"}"#, StatusCode::NOT_FOUND),
            (r#"{"origin": "Harbour", "destination": "Island"}"#, StatusCode::NOT_FOUND),
            (r#"{"origin": "Cape", "destination": "Cape"}"#, StatusCode::BAD_REQUEST),
            (r#"{"origin": "Cape""#, StatusCode::BAD_REQUEST),
        ];
        for (json, expected) in cases {
            let err = find_route(State(state.clone()), body(json)).await.unwrap_err();
            assert_eq!(status(err), expected, "{json}");
        }
    }

    #[tokio::test]
    async fn simulate_all_stations() {
        let Json(resp) = simulate(
            State(test_state()),
            body(r#"{"origin": "Harbour", "destination": "Summit", "vehicle": "Commuter EMU"}"#),
        )
        .await
        .unwrap();

        assert_eq!(resp.legs.len(), 3);
        assert_eq!(resp.legs[0].from, "Harbour");
        assert_eq!(resp.legs[2].to, "Summit");
        assert_eq!(resp.legs[0].dwell_s, 20.0);
        assert_eq!(resp.legs[2].dwell, ARRIVAL_LABEL);
        assert_eq!(resp.totals.dwell_s, 40.0);

        let run: f64 = resp.legs.iter().map(|l| l.run_s).sum();
        assert!((resp.totals.run_s - run).abs() < 1e-9);
        assert!(resp.legs.iter().all(|l| l.run_s > 0.0));
    }

    #[tokio::test]
    async fn simulate_with_stops_and_custom_vehicle() {
        let Json(resp) = simulate(
            State(test_state()),
            body(
                r#"{
                    "origin": "Harbour",
                    "destination": "Summit",
                    "vehicle": {"max_speed_kmh": 95, "acc_kmh_s": 2.0,
                                "dec_kmh_s": 3.5, "curve_factor": 4.0,
                                "description": "Railcar"},
                    "stops": [{"index": 2, "dwell_s": 45}],
                    "default_dwell_s": 10
                }"#,
            ),
        )
        .await
        .unwrap();

        assert_eq!(resp.vehicle, "Railcar");
        assert_eq!(resp.legs.len(), 2);
        assert_eq!(resp.legs[0].to, "Cape");
        assert_eq!(resp.legs[0].dwell_s, 45.0);
        assert_eq!(resp.legs[0].dwell, "0:45");
    }

    #[tokio::test]
    async fn simulate_rejections() {
        let state = test_state();
        let cases = [
            (
                r#"{"origin": "Harbour", "destination": "Summit", "vehicle": "Maglev"}"#,
                StatusCode::NOT_FOUND,
            ),
            (
                r#"{"origin": "Harbour", "destination": "Summit", "vehicle": "Commuter EMU",
                    "stops": [{"index": 12}]}"#,
                StatusCode::BAD_REQUEST,
            ),
            (
                r#"{"origin": "Harbour", "destination": "Summit", "vehicle": "Commuter EMU",
                    "default_dwell_s": -5}"#,
                StatusCode::BAD_REQUEST,
            ),
            (
                r#"{"origin": "Harbour", "destination": "Island", "vehicle": "Commuter EMU"}"#,
                StatusCode::NOT_FOUND,
            ),
        ];
        for (json, expected) in cases {
            let err = simulate(State(state.clone()), body(json)).await.unwrap_err();
            assert_eq!(status(err), expected, "{json}");
        }
    }

    #[test]
    fn route_error_conversion() {
        let err: AppError = RouteError::Empty.into();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }
}
