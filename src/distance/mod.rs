//! Distance and travel time matrices.
//!
//! Provides a dense matrix used for both pairwise distances and travel times.

mod matrix;

pub use matrix::DistanceMatrix;
