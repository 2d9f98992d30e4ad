//! Error types for instance construction and solution queries.

use thiserror::Error;

/// Errors raised while assembling a problem instance.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstanceError {
    /// The customer list is empty, so there is no depot at index 0.
    #[error("instance has no depot (customer list is empty)")]
    NoDepot,
    /// A customer's ID does not match its position in the list.
    #[error("customer at position {position} has id {id}")]
    ClientIdMismatch {
        /// Position in the customer list.
        position: usize,
        /// ID carried by the customer.
        id: usize,
    },
    /// A matrix does not cover every vertex.
    #[error("matrix has size {actual}, expected {expected}")]
    DimensionMismatch {
        /// Number of vertices (clients + depot).
        expected: usize,
        /// Size of the supplied matrix.
        actual: usize,
    },
    /// Vehicle capacity must be positive.
    #[error("vehicle capacity {capacity} is not positive")]
    InvalidCapacity {
        /// Supplied capacity.
        capacity: i32,
    },
    /// A time window with non-finite bounds or `ready > due`.
    #[error("invalid time window [{ready}, {due}]")]
    InvalidTimeWindow {
        /// Earliest service start.
        ready: f64,
        /// Latest service start.
        due: f64,
    },
    /// Raw matrix data whose length is not `size * size`.
    #[error("matrix data of length {len} cannot form a {size}x{size} matrix")]
    InvalidMatrixData {
        /// Declared matrix size.
        size: usize,
        /// Length of the data buffer.
        len: usize,
    },
}

/// Feasibility and lookup failures reported by [`Solution`](crate::solution::Solution).
///
/// Capacity and time-window variants are only ever *reported*; the solution
/// stores infeasible routes and leaves the accept/reject decision to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolutionError {
    /// A route's demand exceeds the vehicle capacity.
    #[error("route {route_index} carries demand {demand} over capacity {capacity}")]
    CapacityExceeded {
        /// Route index in the solution.
        route_index: usize,
        /// Total demand of the route.
        demand: i32,
        /// Vehicle capacity.
        capacity: i32,
    },
    /// Service at a client would start after its time window closes.
    #[error("client {client} on route {route_index} starts at {start}, after latest {latest}")]
    TimeWindowViolated {
        /// Route index in the solution.
        route_index: usize,
        /// Client whose window is violated.
        client: usize,
        /// Propagated service start time.
        start: f64,
        /// Time window due date.
        latest: f64,
    },
    /// A client ID outside `[0, num_clients]`.
    #[error("client {client} is outside the instance (vertices: {num_vertices})")]
    UnknownClient {
        /// Offending client ID.
        client: usize,
        /// Number of vertices in the instance.
        num_vertices: usize,
    },
    /// A route index past the end of the route list.
    #[error("route index {route_index} out of range ({num_routes} routes)")]
    RouteIndexOutOfRange {
        /// Requested route index.
        route_index: usize,
        /// Number of stored routes.
        num_routes: usize,
    },
    /// Route or solution demand does not fit in an `i32`.
    #[error("demand of route {route_index} overflows the demand ledger")]
    DemandOverflow {
        /// Index the route would have been stored at.
        route_index: usize,
    },
    /// A deserialized table with uneven rows or more populated columns than it has.
    #[error("malformed table: rows of {route_row} and {value_row} columns, {populated} populated")]
    MalformedTable {
        /// Length of the route-index row.
        route_row: usize,
        /// Length of the value row.
        value_row: usize,
        /// Declared populated column count.
        populated: usize,
    },
}
