//! Raw per-line geometry consumed by the network builder.

use crate::geo::Coord;

/// A point on a line as drawn in the map data.
#[derive(Debug, Clone, PartialEq)]
pub struct PointInput {
    pub coord: Coord,
    /// Whether this point is a station.
    pub is_station: bool,
    /// Station label. Blank labels get a placeholder during construction.
    pub label: Option<String>,
}

impl PointInput {
    /// A plain track point.
    pub fn track(lat: f64, lon: f64) -> Self {
        Self {
            coord: Coord::new(lat, lon),
            is_station: false,
            label: None,
        }
    }

    /// A station point with a label.
    pub fn station(lat: f64, lon: f64, label: impl Into<String>) -> Self {
        Self {
            coord: Coord::new(lat, lon),
            is_station: true,
            label: Some(label.into()),
        }
    }

    /// The label, if it has any non-whitespace content.
    pub fn usable_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.trim().is_empty())
    }
}

/// One line of the map: an ordered point sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct LineInput {
    pub name: Option<String>,
    /// Planned lines are drawn on the map but carry no trains.
    pub active: bool,
    pub points: Vec<PointInput>,
}

impl LineInput {
    /// An active line.
    pub fn new(name: impl Into<String>, points: Vec<PointInput>) -> Self {
        Self {
            name: Some(name.into()),
            active: true,
            points,
        }
    }

    /// Mark the line as planned (inactive).
    pub fn planned(mut self) -> Self {
        self.active = false;
        self
    }

    /// Display name, falling back to the line's position in the input.
    pub fn display_name(&self, line_idx: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Line {line_idx}"))
    }
}
