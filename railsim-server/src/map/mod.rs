//! Map data import.

mod error;
mod payload;

pub use error::MapError;
pub use payload::{DEFAULT_TITLE, MapData, load_file, parse_payload};
