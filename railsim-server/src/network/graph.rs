//! The station multigraph.
//!
//! Stations live in an arena addressed by [`StationIdx`]; edges live in a
//! flat list addressed by [`EdgeIdx`]. Several lines may join the same two
//! stations, so edges are keyed by (unordered station pair, line name) and
//! a side table maps each pair to its parallel edges in insertion order.

use std::collections::HashMap;

use tracing::debug;

use super::config::NetworkConfig;
use super::identity::IdentityResolver;
use super::input::LineInput;
use crate::domain::{Station, StationId, StationIdx};
use crate::geo::{Coord, polyline_length};

/// Index of an edge in a network's edge list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIdx(pub usize);

/// An unordered pair of stations.
///
/// # Examples
///
/// ```
/// use railsim_server::domain::StationIdx;
/// use railsim_server::network::StationPair;
///
/// let ab = StationPair::new(StationIdx(1), StationIdx(4));
/// let ba = StationPair::new(StationIdx(4), StationIdx(1));
/// assert_eq!(ab, ba);
/// assert_eq!(ab.other(StationIdx(4)), Some(StationIdx(1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationPair(StationIdx, StationIdx);

impl StationPair {
    pub fn new(a: StationIdx, b: StationIdx) -> Self {
        if a <= b {
            StationPair(a, b)
        } else {
            StationPair(b, a)
        }
    }

    /// The lower-indexed station.
    pub fn low(&self) -> StationIdx {
        self.0
    }

    /// The higher-indexed station.
    pub fn high(&self) -> StationIdx {
        self.1
    }

    /// The station at the other end, if `station` is one of the pair.
    pub fn other(&self, station: StationIdx) -> Option<StationIdx> {
        if station == self.0 {
            Some(self.1)
        } else if station == self.1 {
            Some(self.0)
        } else {
            None
        }
    }
}

/// One line's track between two adjacent stations.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub pair: StationPair,
    pub line: String,
    /// Track geometry in the line's drawing order. Which end comes first is
    /// not tied to `pair`; re-orient against a known station before use.
    pub points: Vec<Coord>,
    /// Geodesic length of `points` in metres.
    pub length_m: f64,
}

/// An active line and the stations it calls at, in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub name: String,
    pub stations: Vec<StationIdx>,
}

/// The rail network built from map data.
///
/// Immutable once built; routing overlays its own costs without touching it.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    stations: Vec<Station>,
    index: HashMap<StationId, StationIdx>,
    edges: Vec<Edge>,
    by_pair: HashMap<StationPair, Vec<EdgeIdx>>,
    neighbors: Vec<Vec<StationIdx>>,
    lines: Vec<Line>,
}

impl Network {
    /// Build the network from raw lines.
    ///
    /// Planned lines are ignored entirely. Lines with fewer than two stations
    /// add their stations but no edges. Construction is deterministic: the
    /// same input always yields the same identities and edges.
    pub fn build(lines: &[LineInput], config: &NetworkConfig) -> Self {
        let mut resolver = IdentityResolver::new(config.same_station_threshold_m);

        // Pass 1: station identities, in stable input order.
        let mut resolved: Vec<Vec<(StationIdx, usize)>> = Vec::with_capacity(lines.len());
        for (line_idx, line) in lines.iter().enumerate() {
            let mut line_stations = Vec::new();
            if line.active {
                let line_name = line.display_name(line_idx);
                for (pt_idx, point) in line.points.iter().enumerate() {
                    if !point.is_station {
                        continue;
                    }
                    let label = match point.usable_label() {
                        Some(l) => l.to_owned(),
                        None => format!("Unnamed station ({line_idx}-{pt_idx})"),
                    };
                    let idx = resolver.resolve(&label, point.coord, &line_name);
                    line_stations.push((idx, pt_idx));
                }
            }
            resolved.push(line_stations);
        }

        let (stations, index) = resolver.into_parts();
        let mut network = Network {
            neighbors: vec![Vec::new(); stations.len()],
            stations,
            index,
            edges: Vec::new(),
            by_pair: HashMap::new(),
            lines: Vec::new(),
        };

        // Pass 2: one edge per adjacent station pair on each line.
        for (line_idx, (line, line_stations)) in lines.iter().zip(&resolved).enumerate() {
            if !line.active {
                continue;
            }
            let line_name = line.display_name(line_idx);
            network.record_line(&line_name, line_stations.iter().map(|(s, _)| *s).collect());

            for w in line_stations.windows(2) {
                let ((from, from_pt), (to, to_pt)) = (w[0], w[1]);
                if from == to {
                    continue;
                }
                let points: Vec<Coord> = line.points[from_pt..=to_pt]
                    .iter()
                    .map(|p| p.coord)
                    .collect();
                let length_m = polyline_length(&points);
                network.insert_edge(Edge {
                    pair: StationPair::new(from, to),
                    line: line_name.clone(),
                    points,
                    length_m,
                });
            }
        }

        debug!(
            stations = network.stations.len(),
            edges = network.edges.len(),
            lines = network.lines.len(),
            "Network built"
        );

        network
    }

    /// Lines keep their first-seen position; a repeated name takes the
    /// later station list.
    fn record_line(&mut self, name: &str, stations: Vec<StationIdx>) {
        match self.lines.iter_mut().find(|l| l.name == name) {
            Some(existing) => existing.stations = stations,
            None => self.lines.push(Line {
                name: name.to_owned(),
                stations,
            }),
        }
    }

    /// Insert an edge, replacing any earlier edge with the same pair and line.
    fn insert_edge(&mut self, edge: Edge) {
        let pair = edge.pair;
        let parallel = self.by_pair.entry(pair).or_default();

        if let Some(&existing) = parallel
            .iter()
            .find(|e| self.edges[e.0].line == edge.line)
        {
            self.edges[existing.0] = edge;
            return;
        }

        let idx = EdgeIdx(self.edges.len());
        self.edges.push(edge);
        parallel.push(idx);

        let (a, b) = (pair.low(), pair.high());
        if !self.neighbors[a.0].contains(&b) {
            self.neighbors[a.0].push(b);
        }
        if !self.neighbors[b.0].contains(&a) {
            self.neighbors[b.0].push(a);
        }
    }

    /// All stations, indexed by [`StationIdx`].
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Look up a station by its resolved identity.
    pub fn find(&self, id: &str) -> Option<StationIdx> {
        self.index.get(id).copied()
    }

    /// Coordinate of the station at `idx`.
    pub fn coord(&self, idx: StationIdx) -> Coord {
        self.stations[idx.0].coord
    }

    /// Identity of the station at `idx`.
    pub fn station_id(&self, idx: StationIdx) -> &StationId {
        &self.stations[idx.0].id
    }

    /// Station identities in alphabetical order, for selector lists.
    pub fn sorted_station_ids(&self) -> Vec<&StationId> {
        let mut ids: Vec<&StationId> = self.stations.iter().map(|s| &s.id).collect();
        ids.sort();
        ids
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, idx: EdgeIdx) -> &Edge {
        &self.edges[idx.0]
    }

    /// Parallel edges between two stations, in insertion order.
    pub fn edges_between(&self, a: StationIdx, b: StationIdx) -> &[EdgeIdx] {
        self.by_pair
            .get(&StationPair::new(a, b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Stations directly connected to `station` by at least one edge.
    pub fn neighbors(&self, station: StationIdx) -> &[StationIdx] {
        &self.neighbors[station.0]
    }

    /// Active lines in first-seen order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Names of active lines in first-seen order.
    pub fn line_names(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|l| l.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::distance;
    use crate::network::input::PointInput;

    fn st(lat: f64, lon: f64, label: &str) -> PointInput {
        PointInput::station(lat, lon, label)
    }

    fn pt(lat: f64, lon: f64) -> PointInput {
        PointInput::track(lat, lon)
    }

    fn build(lines: &[LineInput]) -> Network {
        Network::build(lines, &NetworkConfig::default())
    }

    fn idx(network: &Network, id: &str) -> StationIdx {
        network.find(id).unwrap()
    }

    /// Two lines crossing at "Hub", plus a planned branch.
    fn sample_lines() -> Vec<LineInput> {
        vec![
            LineInput::new(
                "North-South",
                vec![
                    st(35.00, 139.00, "North"),
                    pt(35.01, 139.00),
                    st(35.02, 139.00, "Hub"),
                    st(35.04, 139.00, "South"),
                ],
            ),
            LineInput::new(
                "East-West",
                vec![
                    st(35.02, 138.98, "West"),
                    st(35.0201, 139.0001, "Hub"),
                    st(35.02, 139.02, "East"),
                ],
            ),
            LineInput::new(
                "Branch",
                vec![st(35.02, 139.02, "East"), st(35.05, 139.05, "Terminus")],
            )
            .planned(),
        ]
    }

    #[test]
    fn interchange_merges_across_lines() {
        let net = build(&sample_lines());
        assert_eq!(net.station_count(), 5);
        let hub = idx(&net, "Hub");
        assert_eq!(net.neighbors(hub).len(), 4);
        // First occurrence fixes the coordinate.
        assert_eq!(net.coord(hub), Coord::new(35.02, 139.00));
    }

    #[test]
    fn planned_lines_are_ignored() {
        let net = build(&sample_lines());
        assert!(net.find("Terminus").is_none());
        let names: Vec<_> = net.line_names().collect();
        assert_eq!(names, vec!["North-South", "East-West"]);
    }

    #[test]
    fn segment_keeps_intermediate_points() {
        let net = build(&sample_lines());
        let north = idx(&net, "North");
        let hub = idx(&net, "Hub");
        let edges = net.edges_between(hub, north);
        assert_eq!(edges.len(), 1);

        let edge = net.edge(edges[0]);
        assert_eq!(edge.line, "North-South");
        assert_eq!(edge.points.len(), 3);
        assert_eq!(edge.points[0], Coord::new(35.00, 139.00));
        let expected = distance(edge.points[0], edge.points[1])
            + distance(edge.points[1], edge.points[2]);
        assert!((edge.length_m - expected).abs() < 1e-9);
    }

    #[test]
    fn parallel_edges_coexist() {
        let lines = vec![
            LineInput::new("Local", vec![st(35.0, 139.0, "A"), st(35.1, 139.0, "B")]),
            LineInput::new(
                "Express",
                vec![
                    st(35.1, 139.0, "B"),
                    pt(35.05, 139.01),
                    st(35.0, 139.0, "A"),
                ],
            ),
        ];
        let net = build(&lines);
        let (a, b) = (idx(&net, "A"), idx(&net, "B"));
        let edges = net.edges_between(a, b);
        assert_eq!(edges.len(), 2);
        assert_eq!(net.edge(edges[0]).line, "Local");
        assert_eq!(net.edge(edges[1]).line, "Express");
        // Express was drawn B → A and keeps that orientation.
        assert_eq!(net.edge(edges[1]).points[0], Coord::new(35.1, 139.0));
        assert_eq!(net.neighbors(a), &[b]);
    }

    #[test]
    fn repeated_line_name_replaces_segment() {
        let lines = vec![
            LineInput::new("Loop", vec![st(35.0, 139.0, "A"), st(35.1, 139.0, "B")]),
            LineInput::new(
                "Loop",
                vec![st(35.0, 139.0, "A"), pt(35.05, 139.02), st(35.1, 139.0, "B")],
            ),
        ];
        let net = build(&lines);
        let edges = net.edges_between(idx(&net, "A"), idx(&net, "B"));
        assert_eq!(edges.len(), 1);
        assert_eq!(net.edge(edges[0]).points.len(), 3);
        assert_eq!(net.lines().len(), 1);
    }

    #[test]
    fn single_station_line_adds_no_edges() {
        let lines = vec![LineInput::new(
            "Stub",
            vec![st(35.0, 139.0, "Lonely"), pt(35.1, 139.0)],
        )];
        let net = build(&lines);
        assert_eq!(net.station_count(), 1);
        assert!(net.edges().is_empty());
        assert_eq!(net.lines()[0].stations.len(), 1);
    }

    #[test]
    fn unnamed_stations_and_lines_get_placeholders() {
        let mut line = LineInput::new("x", vec![pt(35.0, 139.0), st(35.0, 139.0, "")]);
        line.name = None;
        line.points[1].label = None;
        let net = build(&[line]);
        assert!(net.find("Unnamed station (0-1)").is_some());
        assert_eq!(net.lines()[0].name, "Line 0");
    }

    #[test]
    fn same_name_far_apart_splits() {
        let lines = vec![
            LineInput::new("Keio", vec![st(35.67, 139.48, "Fuchu"), st(35.68, 139.50, "X")]),
            LineInput::new("Fukuen", vec![st(34.57, 133.23, "Fuchu"), st(34.58, 133.25, "Y")]),
        ];
        let net = build(&lines);
        assert!(net.find("Fuchu").is_some());
        assert!(net.find("Fuchu (Fukuen)").is_some());
        assert_eq!(net.station_count(), 4);
    }

    #[test]
    fn consecutive_duplicate_station_adds_no_self_loop() {
        let lines = vec![LineInput::new(
            "Spur",
            vec![
                st(35.0, 139.0, "A"),
                st(35.0001, 139.0, "A"),
                st(35.1, 139.0, "B"),
            ],
        )];
        let net = build(&lines);
        assert_eq!(net.station_count(), 2);
        assert_eq!(net.edges().len(), 1);
        let a = idx(&net, "A");
        assert!(net.edges_between(a, a).is_empty());
    }

    #[test]
    fn sorted_station_ids() {
        let net = build(&sample_lines());
        let ids: Vec<_> = net.sorted_station_ids().iter().map(|s| s.as_str()).collect();
        assert_eq!(ids, vec!["East", "Hub", "North", "South", "West"]);
    }

    #[test]
    fn construction_is_idempotent() {
        let lines = sample_lines();
        assert_eq!(build(&lines), build(&lines));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::network::input::PointInput;
    use proptest::prelude::*;

    fn point() -> impl Strategy<Value = PointInput> {
        (0.0f64..0.05, 0.0f64..0.05, prop::option::of(0u8..6)).prop_map(|(dlat, dlon, label)| {
            match label {
                Some(l) => PointInput::station(35.0 + dlat, 139.0 + dlon, format!("S{l}")),
                None => PointInput::track(35.0 + dlat, 139.0 + dlon),
            }
        })
    }

    fn lines() -> impl Strategy<Value = Vec<LineInput>> {
        prop::collection::vec(
            (0u8..4, any::<bool>(), prop::collection::vec(point(), 0..12)),
            0..6,
        )
        .prop_map(|raw| {
            raw.into_iter()
                .map(|(name, active, points)| {
                    let line = LineInput::new(format!("L{name}"), points);
                    if active { line } else { line.planned() }
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn rebuild_is_identical(input in lines()) {
            let config = NetworkConfig::default();
            prop_assert_eq!(Network::build(&input, &config), Network::build(&input, &config));
        }

        #[test]
        fn edges_are_well_formed(input in lines()) {
            let net = Network::build(&input, &NetworkConfig::default());
            for edge in net.edges() {
                prop_assert!(edge.points.len() >= 2);
                prop_assert!(edge.length_m >= 0.0);
                prop_assert_ne!(edge.pair.low(), edge.pair.high());
                let listed = net.edges_between(edge.pair.low(), edge.pair.high());
                prop_assert!(listed.iter().any(|e| net.edge(*e) == edge));
            }
        }
    }
}
