//! Station identity types.

use std::borrow::Borrow;
use std::fmt;

use serde::Serialize;

use crate::geo::Coord;

/// Index of a station in a network's station arena.
///
/// Only meaningful for the [`Network`](crate::network::Network) that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationIdx(pub usize);

impl fmt::Display for StationIdx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved station identity.
///
/// Usually the raw label from the map data. When two stations share a
/// label but are too far apart to be the same place, later ones are
/// disambiguated with the line name (and a counter, if needed).
///
/// # Examples
///
/// ```
/// use railsim_server::domain::StationId;
///
/// let id = StationId::new("Shinjuku");
/// assert_eq!(id.as_str(), "Shinjuku");
/// assert_eq!(id.to_string(), "Shinjuku");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        StationId(id.into())
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Lets maps keyed by `StationId` be queried with a plain `&str`.
impl Borrow<str> for StationId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A station in the network.
///
/// The coordinate is that of the first occurrence that established the
/// identity; later merged occurrences do not move it.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: StationId,
    pub coord: Coord,
}
