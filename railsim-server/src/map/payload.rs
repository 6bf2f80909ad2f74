//! Map payload layout.
//!
//! A map is a JSON object with a `line` array. Each line has a `name`, a
//! `type` (1 means planned) and a `point` array. Points are themselves
//! arrays: `[lat, lon]` for track, `[lat, lon, "s", label, ...]` for a
//! station. Exported maps often wrap the object as
//! `{ "mapinfo": { "name": ... }, "mapdata": "<the map as a JSON string>" }`.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::error::MapError;
use crate::network::{LineInput, PointInput};

/// Title used when the payload does not name the map.
pub const DEFAULT_TITLE: &str = "Untitled map";

/// Line `type` value marking a planned line.
const PLANNED_LINE_TYPE: f64 = 1.0;

/// Point marker for stations.
const STATION_MARKER: &str = "s";

/// A decoded map, ready for network construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MapData {
    pub title: String,
    pub lines: Vec<LineInput>,
}

#[derive(Debug, Deserialize)]
struct RawMap {
    #[serde(default)]
    line: Vec<RawLine>,
}

#[derive(Debug, Deserialize)]
struct RawLine {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<Value>,
    #[serde(default)]
    point: Vec<RawPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(try_from = "Vec<Value>")]
struct RawPoint {
    lat: f64,
    lon: f64,
    station: bool,
    label: Option<String>,
}

impl TryFrom<Vec<Value>> for RawPoint {
    type Error = String;

    fn try_from(values: Vec<Value>) -> Result<Self, Self::Error> {
        let coord = |i: usize, what: &str| {
            values
                .get(i)
                .and_then(Value::as_f64)
                .ok_or_else(|| format!("point {what} missing or not a number"))
        };
        let lat = coord(0, "latitude")?;
        let lon = coord(1, "longitude")?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(format!("point ({lat}, {lon}) is outside latitude/longitude range"));
        }
        let station = values.get(2).and_then(Value::as_str) == Some(STATION_MARKER);
        let label = values.get(3).and_then(scalar_text);
        Ok(Self {
            lat,
            lon,
            station,
            label,
        })
    }
}

/// Text form of a JSON label. Labels are usually strings but some exports
/// store numbers.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl RawLine {
    fn is_planned(&self) -> bool {
        self.kind.as_ref().and_then(Value::as_f64) == Some(PLANNED_LINE_TYPE)
    }

    fn into_input(self) -> LineInput {
        let active = !self.is_planned();
        let points = self
            .point
            .into_iter()
            .map(|p| {
                let mut input = PointInput::track(p.lat, p.lon);
                if p.station {
                    input.is_station = true;
                    input.label = p.label;
                }
                input
            })
            .collect();
        LineInput {
            name: self.name,
            active,
            points,
        }
    }
}

/// Decode a map payload.
///
/// Accepts the bare map object or the `mapinfo`/`mapdata` wrapper, and
/// tolerates junk before the first `{` (as left by copying from a page).
///
/// # Examples
///
/// ```
/// use railsim_server::map::parse_payload;
///
/// let text = r#"{"line": [{"name": "Coast", "point": [
///     [35.0, 139.0, "s", "Harbour"],
///     [35.01, 139.0],
///     [35.02, 139.0, "s", "Cape"]
/// ]}]}"#;
/// let map = parse_payload(text).unwrap();
/// assert_eq!(map.title, "Untitled map");
/// assert_eq!(map.lines[0].points.len(), 3);
/// ```
pub fn parse_payload(text: &str) -> Result<MapData, MapError> {
    let outer: Value = match serde_json::from_str(text) {
        Ok(v) => v,
        Err(_) => {
            let start = text.find('{').ok_or(MapError::NoObject)?;
            serde_json::from_str(&text[start..])?
        }
    };

    let title = outer
        .get("mapinfo")
        .and_then(|info| info.get("name"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_TITLE)
        .to_owned();

    let embedded = outer
        .get("mapdata")
        .and_then(Value::as_str)
        .map(str::to_owned);
    let raw: RawMap = match embedded {
        Some(inner) => serde_json::from_str(&inner)?,
        None => serde_json::from_value(outer)?,
    };

    let lines: Vec<LineInput> = raw.line.into_iter().map(RawLine::into_input).collect();
    debug!(title = %title, lines = lines.len(), "Map payload decoded");
    Ok(MapData { title, lines })
}

/// Read and decode a map file.
pub fn load_file(path: impl AsRef<Path>) -> Result<MapData, MapError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| MapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_payload(&text)
}
