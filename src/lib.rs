//! # vrptw-solution
//!
//! Solution representation and feasibility propagation for the Vehicle
//! Routing Problem with Time Windows (VRPTW).
//!
//! ## Modules
//!
//! - [`models`] — Instance data (Customer, TimeWindow, ProblemInstance trait)
//! - [`distance`] — Distance and travel time matrix
//! - [`solution`] — Route ledger, time-window propagation, cost, flat encodings
//! - [`error`] — Instance and solution error types

pub mod distance;
pub mod error;
pub mod models;
pub mod solution;
