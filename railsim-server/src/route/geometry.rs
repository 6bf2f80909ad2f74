//! Track geometry along a route.
//!
//! Edge polylines keep the drawing order of their line, which may run
//! either way relative to the direction of travel. Each hop is oriented by
//! checking which end lies nearer the station the train is leaving.

use crate::geo::{Coord, distance};
use crate::network::Network;

use super::path::Hop;

/// Return `points` oriented to start at the end nearest `anchor`.
///
/// Keeps the given order on a tie.
///
/// # Examples
///
/// ```
/// use railsim_server::geo::Coord;
/// use railsim_server::route::orient;
///
/// let a = Coord::new(35.0, 139.0);
/// let b = Coord::new(35.1, 139.0);
/// assert_eq!(orient(&[a, b], b), vec![b, a]);
/// assert_eq!(orient(&[a, b], a), vec![a, b]);
/// ```
pub fn orient(points: &[Coord], anchor: Coord) -> Vec<Coord> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    if distance(*last, anchor) < distance(*first, anchor) {
        points.iter().rev().copied().collect()
    } else {
        points.to_vec()
    }
}

/// Oriented polyline of a single hop, starting at its departure station.
pub fn hop_points(network: &Network, hop: &Hop) -> Vec<Coord> {
    orient(&network.edge(hop.edge).points, network.coord(hop.from))
}

/// Concatenate consecutive hops into one continuous polyline.
///
/// The joint point shared by adjacent hops appears once.
pub fn stitch(network: &Network, hops: &[Hop]) -> Vec<Coord> {
    let mut out: Vec<Coord> = Vec::new();
    for hop in hops {
        let points = hop_points(network, hop);
        let skip = usize::from(!out.is_empty());
        out.extend(points.into_iter().skip(skip));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::{LineInput, NetworkConfig, PointInput};

    #[test]
    fn orient_empty_and_single() {
        let p = Coord::new(35.0, 139.0);
        assert!(orient(&[], p).is_empty());
        assert_eq!(orient(&[p], p), vec![p]);
    }

    #[test]
    fn orient_does_not_mutate_input() {
        let pts = vec![Coord::new(35.0, 139.0), Coord::new(35.1, 139.0)];
        let reversed = orient(&pts, pts[1]);
        assert_eq!(reversed[0], pts[1]);
        assert_eq!(pts[0], Coord::new(35.0, 139.0));
    }

    #[test]
    fn stitch_reorients_reverse_drawn_hops() {
        // Line 1 drawn A → B, line 2 drawn C → B (against travel).
        let lines = vec![
            LineInput::new(
                "One",
                vec![
                    PointInput::station(35.00, 139.0, "A"),
                    PointInput::track(35.005, 139.0),
                    PointInput::station(35.01, 139.0, "B"),
                ],
            ),
            LineInput::new(
                "Two",
                vec![
                    PointInput::station(35.02, 139.0, "C"),
                    PointInput::track(35.015, 139.0),
                    PointInput::station(35.01, 139.0, "B"),
                ],
            ),
        ];
        let net = Network::build(&lines, &NetworkConfig::default());
        let (a, b, c) = (
            net.find("A").unwrap(),
            net.find("B").unwrap(),
            net.find("C").unwrap(),
        );
        let hops = vec![
            Hop {
                from: a,
                to: b,
                edge: net.edges_between(a, b)[0],
            },
            Hop {
                from: b,
                to: c,
                edge: net.edges_between(b, c)[0],
            },
        ];

        let pts = stitch(&net, &hops);
        let lats: Vec<f64> = pts.iter().map(|p| p.lat).collect();
        assert_eq!(lats, vec![35.00, 35.005, 35.01, 35.015, 35.02]);
    }
}
