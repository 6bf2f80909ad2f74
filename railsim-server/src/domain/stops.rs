//! Stopping patterns.
//!
//! A `StopPlan` marks which stations of a route the train calls at and how
//! long it dwells there. It is built by the caller and resolved against a
//! concrete route length before simulation.

use std::collections::BTreeMap;

use super::DomainError;

/// A resolved call in a stopping pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stop {
    /// Index into the route's station list.
    pub index: usize,
    /// Dwell at this stop in seconds.
    pub dwell_s: f64,
}

/// Caller-supplied stopping pattern: route indices with optional dwell.
///
/// # Examples
///
/// ```
/// use railsim_server::domain::StopPlan;
///
/// let mut plan = StopPlan::new();
/// plan.add_stop(2, Some(45.0));
///
/// // Origin and terminus are always added back in.
/// let stops = plan.resolve(5, 20.0).unwrap();
/// let indices: Vec<_> = stops.iter().map(|s| s.index).collect();
/// assert_eq!(indices, vec![0, 2, 4]);
/// assert_eq!(stops[1].dwell_s, 45.0);
/// assert_eq!(stops[0].dwell_s, 20.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StopPlan {
    stops: BTreeMap<usize, Option<f64>>,
}

impl StopPlan {
    /// An empty plan. Resolves to a non-stop run from origin to terminus.
    pub fn new() -> Self {
        Self::default()
    }

    /// A plan calling at every station of a route with `route_len` stations.
    pub fn all_stations(route_len: usize) -> Self {
        Self {
            stops: (0..route_len).map(|i| (i, None)).collect(),
        }
    }

    /// Mark `index` as a stop. `None` dwell means "use the default".
    ///
    /// Adding the same index twice keeps the later dwell.
    pub fn add_stop(&mut self, index: usize, dwell_s: Option<f64>) -> &mut Self {
        self.stops.insert(index, dwell_s);
        self
    }

    /// Remove a stop, if present.
    pub fn remove_stop(&mut self, index: usize) -> &mut Self {
        self.stops.remove(&index);
        self
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Resolve against a route of `route_len` stations.
    ///
    /// Inserts the origin and terminus if missing, fills in `default_dwell_s`
    /// for stops without an explicit dwell, and returns stops in route order.
    ///
    /// # Errors
    ///
    /// - the route has fewer than two stations
    /// - a stop index is beyond the route
    /// - a dwell is negative or not finite
    pub fn resolve(
        &self,
        route_len: usize,
        default_dwell_s: f64,
    ) -> Result<Vec<Stop>, DomainError> {
        if route_len < 2 {
            return Err(DomainError::RouteTooShort(route_len));
        }

        let mut stops = self.stops.clone();
        stops.entry(0).or_insert(None);
        stops.entry(route_len - 1).or_insert(None);

        stops
            .into_iter()
            .map(|(index, dwell)| {
                if index >= route_len {
                    return Err(DomainError::StopOutOfRange { index, route_len });
                }
                let dwell_s = dwell.unwrap_or(default_dwell_s);
                if !dwell_s.is_finite() || dwell_s < 0.0 {
                    return Err(DomainError::InvalidDwell { index, dwell_s });
                }
                Ok(Stop { index, dwell_s })
            })
            .collect()
    }
}

impl FromIterator<(usize, Option<f64>)> for StopPlan {
    fn from_iter<I: IntoIterator<Item = (usize, Option<f64>)>>(iter: I) -> Self {
        Self {
            stops: iter.into_iter().collect(),
        }
    }
}
