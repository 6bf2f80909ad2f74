//! Route selection over the rail network.
//!
//! A [`RouteRequest`] names origin, destination and optional via station
//! along with line preferences. [`select_route`] returns a [`Route`]: the
//! station sequence plus the line edge serving each hop.

mod cost;
mod geometry;
mod path;
mod search;

pub use cost::{AVOID_MULTIPLIER, CostModel, CostOverlay, PREFER_MULTIPLIER, REPEAT_PENALTY};
pub use geometry::{hop_points, orient, stitch};
pub use path::{Hop, Route};
pub use search::{RouteError, RouteRequest, select_route};
