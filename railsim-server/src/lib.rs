//! Rail running-time simulator.
//!
//! Loads a hand-drawn rail map, builds a station network from it, picks
//! routes by line preference, and estimates running times by simulating a
//! train with a given performance envelope over the route's track.

pub mod domain;
pub mod geo;
pub mod map;
pub mod network;
pub mod route;
pub mod sim;
pub mod vehicles;
pub mod web;
