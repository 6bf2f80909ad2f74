//! Rail network construction.
//!
//! Turns per-line point sequences from the map into a station multigraph:
//! station labels are resolved to identities by proximity, and each pair of
//! adjacent stations on a line becomes an edge carrying the track geometry
//! between them.

mod config;
mod graph;
mod identity;
mod input;

pub use config::NetworkConfig;
pub use graph::{Edge, EdgeIdx, Line, Network, StationPair};
pub use input::{LineInput, PointInput};
