//! Edge costs for route selection.
//!
//! The base network is never modified. A [`CostModel`] scales edge lengths
//! by the user's line preferences, and a [`CostOverlay`] adds per-request
//! penalties on top (used to keep a return trip off the outbound track).

use std::collections::{HashMap, HashSet};

use crate::domain::StationIdx;
use crate::network::{Edge, EdgeIdx, Network, StationPair};

/// Cost multiplier for lines the user wants to avoid.
pub const AVOID_MULTIPLIER: f64 = 10.0;

/// Cost multiplier for lines the user prefers.
pub const PREFER_MULTIPLIER: f64 = 0.2;

/// Penalty applied to outbound track when no-repeat routing is requested.
pub const REPEAT_PENALTY: f64 = 10_000.0;

/// Line preferences.
///
/// A line in both sets counts as avoided.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostModel {
    avoid: HashSet<String>,
    prefer: HashSet<String>,
}

impl CostModel {
    /// A model with no preferences: cost equals track length.
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn new<A, P>(avoid: A, prefer: P) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            avoid: avoid.into_iter().map(Into::into).collect(),
            prefer: prefer.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.avoid.is_empty() && self.prefer.is_empty()
    }

    /// Multiplier applied to edges of `line`.
    pub fn multiplier(&self, line: &str) -> f64 {
        if self.avoid.contains(line) {
            AVOID_MULTIPLIER
        } else if self.prefer.contains(line) {
            PREFER_MULTIPLIER
        } else {
            1.0
        }
    }

    /// Preference-adjusted cost of an edge.
    pub fn edge_cost(&self, edge: &Edge) -> f64 {
        edge.length_m * self.multiplier(&edge.line)
    }

    /// The cheapest of the parallel edges between `a` and `b`.
    ///
    /// Ties go to the edge inserted first, i.e. the line that appears first
    /// in the map data. Route search and hop attribution both go through
    /// here, so they always agree on which line serves a hop.
    pub fn best_edge(
        &self,
        network: &Network,
        a: StationIdx,
        b: StationIdx,
    ) -> Option<(EdgeIdx, f64)> {
        let mut best: Option<(EdgeIdx, f64)> = None;
        for &idx in network.edges_between(a, b) {
            let cost = self.edge_cost(network.edge(idx));
            match best {
                Some((_, best_cost)) if cost >= best_cost => {}
                _ => best = Some((idx, cost)),
            }
        }
        best
    }
}

/// Per-request multiplicative penalties keyed by station pair.
///
/// Penalties apply to every parallel edge of a pair alike, so they never
/// change which line is cheapest for that pair.
#[derive(Debug, Clone, Default)]
pub struct CostOverlay {
    factors: HashMap<StationPair, f64>,
}

impl CostOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiply the cost of every pair along `stations` by `factor`.
    pub fn penalize_path(&mut self, stations: &[StationIdx], factor: f64) {
        for w in stations.windows(2) {
            *self
                .factors
                .entry(StationPair::new(w[0], w[1]))
                .or_insert(1.0) *= factor;
        }
    }

    /// Factor for a pair; 1.0 if unpenalised.
    pub fn factor(&self, a: StationIdx, b: StationIdx) -> f64 {
        self.factors
            .get(&StationPair::new(a, b))
            .copied()
            .unwrap_or(1.0)
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

/// The network as seen by one route request: base lengths, preferences,
/// and any overlay penalties.
pub(crate) struct CostedView<'a> {
    network: &'a Network,
    model: &'a CostModel,
    overlay: CostOverlay,
}

impl<'a> CostedView<'a> {
    pub(crate) fn new(network: &'a Network, model: &'a CostModel) -> Self {
        Self {
            network,
            model,
            overlay: CostOverlay::new(),
        }
    }

    pub(crate) fn network(&self) -> &'a Network {
        self.network
    }

    pub(crate) fn overlay_mut(&mut self) -> &mut CostOverlay {
        &mut self.overlay
    }

    /// Edge used for the hop `a → b` and its effective cost.
    pub(crate) fn hop(&self, a: StationIdx, b: StationIdx) -> Option<(EdgeIdx, f64)> {
        let (edge, cost) = self.model.best_edge(self.network, a, b)?;
        Some((edge, cost * self.overlay.factor(a, b)))
    }
}
