//! Domain types for the running-time simulator.
//!
//! This module contains the value types shared by the network, routing
//! and simulation layers. Types that carry invariants enforce them at
//! construction time, so code that receives them can trust their validity.

mod error;
mod station;
mod stops;
mod time;
mod vehicle;

pub use error::DomainError;
pub use station::{Station, StationId, StationIdx};
pub use stops::{Stop, StopPlan};
pub use time::format_mm_ss;
pub use vehicle::{InvalidVehicle, VehicleSpec};
