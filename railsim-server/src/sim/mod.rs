//! Running-time simulation.
//!
//! Per leg: [`sample_track`] resamples the stitched track and attaches
//! curve speed limits, [`apply_braking`] turns limits into a braking
//! curve, and [`run`] integrates the train's motion over it.

mod braking;
mod config;
mod journey;
mod runner;
mod sampler;

pub use braking::apply_braking;
pub use config::SimConfig;
pub use journey::{JourneyReport, LegJob, LegReport, Totals, plan_legs, simulate_journey};
pub use runner::run;
pub use sampler::{TrackSample, sample_track};
