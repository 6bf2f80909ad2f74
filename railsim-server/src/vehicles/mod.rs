//! Named vehicle presets.
//!
//! Users usually pick a train type from a list rather than typing in
//! performance figures. This module provides that list and lookup by name.

use crate::domain::VehicleSpec;

/// An ordered collection of named vehicle specs.
///
/// Names are unique; adding a name again replaces the earlier spec but
/// keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VehicleCatalog {
    entries: Vec<(String, VehicleSpec)>,
}

impl VehicleCatalog {
    /// Create an empty catalogue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a named vehicle.
    pub fn insert(&mut self, name: impl Into<String>, spec: VehicleSpec) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = spec,
            None => self.entries.push((name, spec)),
        }
    }

    /// Look up a vehicle by name.
    pub fn get(&self, name: &str) -> Option<&VehicleSpec> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, spec)| spec)
    }

    /// Vehicle names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &VehicleSpec)> {
        self.entries.iter().map(|(n, s)| (n.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder for vehicle catalogues.
#[derive(Debug, Default)]
pub struct VehicleCatalogBuilder {
    inner: VehicleCatalog,
}

impl VehicleCatalogBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vehicle from raw figures. Invalid figures are skipped.
    pub fn add(
        mut self,
        name: &str,
        max_speed_kmh: f64,
        acc_kmh_s: f64,
        dec_kmh_s: f64,
        curve_factor: f64,
        description: &str,
    ) -> Self {
        if let Ok(spec) =
            VehicleSpec::new(max_speed_kmh, acc_kmh_s, dec_kmh_s, curve_factor, description)
        {
            self.inner.insert(name, spec);
        }
        self
    }

    /// Build the catalogue.
    pub fn build(self) -> VehicleCatalog {
        self.inner
    }
}

/// The built-in vehicle list.
///
/// Figures are typical of each class: top speed (km/h), acceleration and
/// service braking (km/h/s), and a curve factor relating curve radius to
/// permitted speed.
pub fn default_catalog() -> VehicleCatalog {
    VehicleCatalogBuilder::new()
        .add("Commuter EMU", 110.0, 3.0, 4.2, 4.5, "Suburban stopping train, brisk acceleration")
        .add("Rapid EMU", 130.0, 2.5, 4.2, 4.8, "Outer-suburban rapid service")
        .add("Limited express", 130.0, 2.2, 4.2, 5.0, "Tilting limited express")
        .add("Diesel railcar", 95.0, 2.0, 3.5, 4.0, "Rural branch line railcar")
        .add("Subway EMU", 80.0, 3.3, 4.5, 4.0, "Metro stock, high acceleration and low top speed")
        .add("High-speed train", 300.0, 2.6, 4.5, 7.0, "Dedicated high-speed line stock")
        .add("Freight", 100.0, 1.0, 3.0, 4.0, "Electric locomotive with a container train")
        .build()
}
