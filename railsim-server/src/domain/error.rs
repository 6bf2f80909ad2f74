//! Domain error types.
//!
//! These errors represent invalid caller-supplied values in the domain
//! layer. They are distinct from routing and I/O errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A journey needs at least an origin and a terminus
    #[error("route has {0} station(s); at least two are needed")]
    RouteTooShort(usize),

    /// Stop index does not exist on the route
    #[error("stop index {index} is out of range for a route of {route_len} stations")]
    StopOutOfRange { index: usize, route_len: usize },

    /// Dwell time is negative or not a number
    #[error("invalid dwell of {dwell_s} s at stop {index}")]
    InvalidDwell { index: usize, dwell_s: f64 },
}
