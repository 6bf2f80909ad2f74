//! Selected routes.

use crate::domain::{StationId, StationIdx};
use crate::geo::Coord;
use crate::network::{EdgeIdx, Network};

use super::cost::CostModel;
use super::geometry::{hop_points, stitch};
use super::search::RouteError;

/// One station-to-station step of a route and the line edge serving it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hop {
    pub from: StationIdx,
    pub to: StationIdx,
    pub edge: EdgeIdx,
}

/// An ordered station path through the network.
///
/// # Invariants
///
/// - At least two stations
/// - `hops.len() == stations.len() - 1`
/// - `hops[i]` runs from `stations[i]` to `stations[i + 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    stations: Vec<StationIdx>,
    hops: Vec<Hop>,
}

impl Route {
    /// Build a route from hops found by the search.
    pub(crate) fn from_hops(origin: StationIdx, hops: Vec<Hop>) -> Self {
        let mut stations = Vec::with_capacity(hops.len() + 1);
        stations.push(origin);
        stations.extend(hops.iter().map(|h| h.to));
        Self { stations, hops }
    }

    /// Rebuild a route from a plain station list, attributing each hop to
    /// the line the cost model makes cheapest (first line on ties).
    ///
    /// # Errors
    ///
    /// Fails if fewer than two stations are given or two consecutive
    /// stations are not adjacent.
    pub fn from_stations(
        network: &Network,
        stations: Vec<StationIdx>,
        model: &CostModel,
    ) -> Result<Self, RouteError> {
        let (Some(&first), Some(&last)) = (stations.first(), stations.last()) else {
            return Err(RouteError::Empty);
        };
        if stations.len() < 2 {
            return Err(RouteError::SameOriginDestination(
                network.station_id(first).clone(),
            ));
        }

        let hops = stations
            .windows(2)
            .map(|w| {
                let (edge, _) = model.best_edge(network, w[0], w[1]).ok_or_else(|| {
                    RouteError::NoPath {
                        from: network.station_id(w[0]).clone(),
                        to: network.station_id(w[1]).clone(),
                    }
                })?;
                Ok(Hop {
                    from: w[0],
                    to: w[1],
                    edge,
                })
            })
            .collect::<Result<Vec<_>, RouteError>>()?;

        debug_assert_eq!(hops.last().map(|h| h.to), Some(last));
        Ok(Self { stations, hops })
    }

    pub fn stations(&self) -> &[StationIdx] {
        &self.stations
    }

    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    /// Number of stations on the route.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Always false: a route has at least two stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn origin(&self) -> StationIdx {
        self.stations[0]
    }

    pub fn destination(&self) -> StationIdx {
        self.stations[self.stations.len() - 1]
    }

    /// Station identities in route order.
    pub fn station_ids<'n>(&self, network: &'n Network) -> Vec<&'n StationId> {
        self.stations
            .iter()
            .map(|s| network.station_id(*s))
            .collect()
    }

    /// Track length of the route in metres.
    pub fn distance_m(&self, network: &Network) -> f64 {
        self.hops
            .iter()
            .map(|h| network.edge(h.edge).length_m)
            .sum()
    }

    /// Line names served, with consecutive repeats collapsed.
    pub fn used_lines<'n>(&self, network: &'n Network) -> Vec<&'n str> {
        let mut lines: Vec<&str> = Vec::new();
        for hop in &self.hops {
            let line = network.edge(hop.edge).line.as_str();
            if lines.last() != Some(&line) {
                lines.push(line);
            }
        }
        lines
    }

    /// Per-hop polylines, each oriented in the direction of travel.
    pub fn hop_geometry(&self, network: &Network) -> Vec<Vec<Coord>> {
        self.hops.iter().map(|h| hop_points(network, h)).collect()
    }

    /// Continuous track between route positions `start` and `end`
    /// (inclusive station indices, `start < end`).
    ///
    /// Returns an empty polyline for an empty or out-of-range span.
    pub fn span_points(&self, network: &Network, start: usize, end: usize) -> Vec<Coord> {
        if start >= end || end >= self.stations.len() {
            return Vec::new();
        }
        stitch(network, &self.hops[start..end])
    }
}
