//! Least-cost route search.
//!
//! Dijkstra over the station multigraph. Between two adjacent stations only
//! the cheapest parallel edge is considered, chosen by
//! [`CostModel::best_edge`].

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, trace};

use crate::domain::{StationId, StationIdx};
use crate::network::Network;

use super::cost::{CostModel, CostedView, REPEAT_PENALTY};
use super::path::{Hop, Route};

/// Error from route selection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouteError {
    /// A requested station name matches no station in the network
    #[error("unknown station: {0}")]
    UnknownStation(String),

    /// The route would start and end at the same station
    #[error("origin and destination are both {0}")]
    SameOriginDestination(StationId),

    /// The destination cannot be reached
    #[error("no route from {from} to {to}")]
    NoPath { from: StationId, to: StationId },

    /// No stations at all
    #[error("route has no stations")]
    Empty,
}

impl RouteError {
    /// Whether no usable route exists between the named stations, as
    /// opposed to a station name that could not be resolved.
    pub fn is_no_route(&self) -> bool {
        !matches!(self, RouteError::UnknownStation(_))
    }
}

/// A route query.
///
/// # Examples
///
/// ```
/// use railsim_server::route::{CostModel, RouteRequest};
///
/// let request = RouteRequest::new("Tokyo", "Osaka")
///     .with_via("Nagoya")
///     .with_cost(CostModel::new(["Tokaido Shinkansen"], Vec::<String>::new()))
///     .no_repeat(true);
/// assert_eq!(request.via.as_deref(), Some("Nagoya"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRequest {
    pub origin: String,
    pub destination: String,
    pub via: Option<String>,
    pub cost: CostModel,
    /// Keep the via→destination part off track used by origin→via.
    pub no_repeat: bool,
}

impl RouteRequest {
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            via: None,
            cost: CostModel::neutral(),
            no_repeat: false,
        }
    }

    pub fn with_via(mut self, via: impl Into<String>) -> Self {
        self.via = Some(via.into());
        self
    }

    pub fn with_cost(mut self, cost: CostModel) -> Self {
        self.cost = cost;
        self
    }

    pub fn no_repeat(mut self, no_repeat: bool) -> Self {
        self.no_repeat = no_repeat;
        self
    }
}

/// Dijkstra priority queue entry.
#[derive(Debug, Clone, Copy)]
struct State {
    cost: f64,
    station: StationIdx,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on cost; station index breaks ties.
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.station.cmp(&self.station))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

fn resolve(network: &Network, name: &str) -> Result<StationIdx, RouteError> {
    network
        .find(name)
        .ok_or_else(|| RouteError::UnknownStation(name.to_owned()))
}

/// Cheapest hops from `from` to `to` under the view's costs.
///
/// Returns an empty list when `from == to`, `None` when unreachable.
fn shortest_hops(view: &CostedView<'_>, from: StationIdx, to: StationIdx) -> Option<Vec<Hop>> {
    let network = view.network();
    let n = network.station_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<Hop>> = vec![None; n];
    let mut heap = BinaryHeap::new();

    dist[from.0] = 0.0;
    heap.push(State {
        cost: 0.0,
        station: from,
    });

    while let Some(State { cost, station }) = heap.pop() {
        if station == to {
            break;
        }
        if cost > dist[station.0] {
            continue;
        }
        for &next in network.neighbors(station) {
            let Some((edge, weight)) = view.hop(station, next) else {
                continue;
            };
            let candidate = cost + weight;
            if candidate < dist[next.0] {
                dist[next.0] = candidate;
                prev[next.0] = Some(Hop {
                    from: station,
                    to: next,
                    edge,
                });
                heap.push(State {
                    cost: candidate,
                    station: next,
                });
            }
        }
    }

    if !dist[to.0].is_finite() {
        return None;
    }

    let mut hops = Vec::new();
    let mut cursor = to;
    while cursor != from {
        let hop = prev[cursor.0]?;
        hops.push(hop);
        cursor = hop.from;
    }
    hops.reverse();
    trace!(from = %from, to = %to, cost = dist[to.0], hops = hops.len(), "Shortest path");
    Some(hops)
}

/// Find the least-cost route for a request.
///
/// With a via station the route is searched in two parts and joined at the
/// via. When `no_repeat` is set, every station pair used by the first part
/// costs [`REPEAT_PENALTY`] times more for the second.
///
/// # Errors
///
/// - [`RouteError::UnknownStation`] if any name is not in the network
/// - [`RouteError::SameOriginDestination`] if the route collapses to a
///   single station
/// - [`RouteError::NoPath`] if some part is unreachable
pub fn select_route(network: &Network, request: &RouteRequest) -> Result<Route, RouteError> {
    let origin = resolve(network, &request.origin)?;
    let destination = resolve(network, &request.destination)?;
    let via = request
        .via
        .as_deref()
        .map(|name| resolve(network, name))
        .transpose()?;

    if via.is_none() && origin == destination {
        return Err(RouteError::SameOriginDestination(
            network.station_id(origin).clone(),
        ));
    }

    let mut view = CostedView::new(network, &request.cost);
    let no_path = |from: StationIdx, to: StationIdx| RouteError::NoPath {
        from: network.station_id(from).clone(),
        to: network.station_id(to).clone(),
    };

    let hops = match via {
        None => shortest_hops(&view, origin, destination)
            .ok_or_else(|| no_path(origin, destination))?,
        Some(via) => {
            let mut hops =
                shortest_hops(&view, origin, via).ok_or_else(|| no_path(origin, via))?;
            if request.no_repeat {
                let outbound = Route::from_hops(origin, hops.clone());
                view.overlay_mut()
                    .penalize_path(outbound.stations(), REPEAT_PENALTY);
            }
            let second =
                shortest_hops(&view, via, destination).ok_or_else(|| no_path(via, destination))?;
            hops.extend(second);
            hops
        }
    };

    if hops.is_empty() {
        return Err(RouteError::SameOriginDestination(
            network.station_id(origin).clone(),
        ));
    }

    let route = Route::from_hops(origin, hops);
    debug!(
        origin = %network.station_id(origin),
        destination = %network.station_id(destination),
        via = ?request.via,
        stations = route.len(),
        distance_m = route.distance_m(network),
        "Route selected"
    );
    Ok(route)
}
