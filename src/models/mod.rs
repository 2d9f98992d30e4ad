//! Domain model types for VRPTW instances.
//!
//! Provides clients with demands, service durations and time windows, and
//! the read-only [`ProblemInstance`] interface a solution is evaluated
//! against, with a matrix-backed [`Instance`] implementation.

mod customer;
mod problem;

pub use customer::{Customer, TimeWindow};
pub use problem::{Instance, ProblemInstance};
