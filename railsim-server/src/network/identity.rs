//! Station identity resolution.
//!
//! Map data has no station IDs, only labels on points. The same label can
//! appear on several lines (an interchange) or on unrelated stations that
//! happen to share a name. Occurrences are matched online, in input order:
//! an occurrence joins the first earlier identity with the same label that
//! lies within the proximity threshold, otherwise it mints a new one.

use std::collections::HashMap;

use crate::domain::{Station, StationId, StationIdx};
use crate::geo::{Coord, distance};

/// Online station matcher that also owns the resulting station arena.
#[derive(Debug)]
pub(crate) struct IdentityResolver {
    threshold_m: f64,
    /// Raw label → identities minted for it, in creation order.
    groups: HashMap<String, Vec<StationIdx>>,
    stations: Vec<Station>,
    index: HashMap<StationId, StationIdx>,
}

impl IdentityResolver {
    pub(crate) fn new(threshold_m: f64) -> Self {
        Self {
            threshold_m,
            groups: HashMap::new(),
            stations: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Resolve one station occurrence to an identity, minting if needed.
    pub(crate) fn resolve(&mut self, label: &str, coord: Coord, line_name: &str) -> StationIdx {
        let group = self.groups.entry(label.to_owned()).or_default();

        if let Some(&found) = group
            .iter()
            .find(|idx| distance(coord, self.stations[idx.0].coord) < self.threshold_m)
        {
            return found;
        }

        let id = mint_id(label, line_name, group.is_empty(), &self.index);
        let idx = StationIdx(self.stations.len());
        self.stations.push(Station {
            id: id.clone(),
            coord,
        });
        self.index.insert(id, idx);
        group.push(idx);
        idx
    }

    pub(crate) fn into_parts(self) -> (Vec<Station>, HashMap<StationId, StationIdx>) {
        (self.stations, self.index)
    }
}

/// Pick a fresh identity for a new station.
///
/// The first station for a label gets the bare label. Later ones get
/// `"{label} ({line})"`, then `"{label} ({line}) 2"`, `"... 3"` and so on
/// until the name is unused anywhere in the network.
fn mint_id(
    label: &str,
    line_name: &str,
    first_for_label: bool,
    taken: &HashMap<StationId, StationIdx>,
) -> StationId {
    if first_for_label && !taken.contains_key(label) {
        return StationId::new(label);
    }

    let base = format!("{label} ({line_name})");
    let mut candidate = base.clone();
    let mut counter = 2;
    while taken.contains_key(candidate.as_str()) {
        candidate = format!("{base} {counter}");
        counter += 1;
    }
    StationId::new(candidate)
}
