//! Problem instance trait and its matrix-backed implementation.

use crate::distance::DistanceMatrix;
use crate::error::InstanceError;

use super::{Customer, TimeWindow};

/// Read-only VRPTW instance data consumed by a [`Solution`](crate::solution::Solution).
///
/// Vertex 0 is the depot; vertices `1..=num_clients()` are clients. All
/// lookups must stay stable for the lifetime of any solution built on the
/// instance.
///
/// # Examples
///
/// ```
/// use vrptw_solution::models::{ProblemInstance, TimeWindow};
///
/// struct Line;
///
/// impl ProblemInstance for Line {
///     fn num_clients(&self) -> usize { 2 }
///     fn demand(&self, client: usize) -> i32 { client as i32 }
///     fn time_window(&self, _client: usize) -> TimeWindow { TimeWindow::unbounded() }
///     fn service_duration(&self, _client: usize) -> f64 { 0.0 }
///     fn distance(&self, from: usize, to: usize) -> f64 {
///         (from as f64 - to as f64).abs()
///     }
///     fn vehicle_capacity(&self) -> i32 { 10 }
/// }
///
/// assert_eq!(Line.num_vertices(), 3);
/// assert_eq!(Line.travel_time(0, 2), 2.0);
/// ```
pub trait ProblemInstance: Send + Sync {
    /// Number of clients, excluding the depot.
    fn num_clients(&self) -> usize;

    /// Number of vertices (clients plus depot).
    fn num_vertices(&self) -> usize {
        self.num_clients() + 1
    }

    /// Demand of a client.
    fn demand(&self, client: usize) -> i32;

    /// Service time window of a client.
    fn time_window(&self, client: usize) -> TimeWindow;

    /// Service duration at a client.
    fn service_duration(&self, client: usize) -> f64;

    /// Travel distance from vertex `from` to vertex `to`.
    fn distance(&self, from: usize, to: usize) -> f64;

    /// Travel time from vertex `from` to vertex `to`.
    ///
    /// Defaults to `distance(from, to)` (speed = 1).
    fn travel_time(&self, from: usize, to: usize) -> f64 {
        self.distance(from, to)
    }

    /// Capacity of every vehicle in the (homogeneous) fleet.
    fn vehicle_capacity(&self) -> i32;
}

/// A VRPTW instance backed by a customer list and dense matrices.
///
/// # Examples
///
/// ```
/// use vrptw_solution::models::{Customer, Instance, ProblemInstance};
/// use vrptw_solution::distance::DistanceMatrix;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 3.0, 4.0, 3, 2.0),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
/// let instance = Instance::new(customers, dm, 10).unwrap();
/// assert_eq!(instance.num_clients(), 1);
/// assert_eq!(instance.vehicle_capacity(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    customers: Vec<Customer>,
    distances: DistanceMatrix,
    travel_times: Option<DistanceMatrix>,
    vehicle_capacity: i32,
}

impl Instance {
    /// Creates an instance from customers (index 0 = depot), a distance
    /// matrix and the vehicle capacity.
    pub fn new(
        customers: Vec<Customer>,
        distances: DistanceMatrix,
        vehicle_capacity: i32,
    ) -> Result<Self, InstanceError> {
        if customers.is_empty() {
            return Err(InstanceError::NoDepot);
        }
        if let Some((position, c)) = customers
            .iter()
            .enumerate()
            .find(|(position, c)| c.id() != *position)
        {
            return Err(InstanceError::ClientIdMismatch {
                position,
                id: c.id(),
            });
        }
        if distances.size() != customers.len() {
            return Err(InstanceError::DimensionMismatch {
                expected: customers.len(),
                actual: distances.size(),
            });
        }
        if vehicle_capacity <= 0 {
            return Err(InstanceError::InvalidCapacity {
                capacity: vehicle_capacity,
            });
        }
        Ok(Self {
            customers,
            distances,
            travel_times: None,
            vehicle_capacity,
        })
    }

    /// Uses a separate travel time matrix instead of the distances.
    pub fn with_travel_times(mut self, travel_times: DistanceMatrix) -> Result<Self, InstanceError> {
        if travel_times.size() != self.customers.len() {
            return Err(InstanceError::DimensionMismatch {
                expected: self.customers.len(),
                actual: travel_times.size(),
            });
        }
        self.travel_times = Some(travel_times);
        Ok(self)
    }

    /// All vertices, depot first.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// The distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }
}

impl ProblemInstance for Instance {
    fn num_clients(&self) -> usize {
        self.customers.len() - 1
    }

    fn demand(&self, client: usize) -> i32 {
        self.customers[client].demand()
    }

    fn time_window(&self, client: usize) -> TimeWindow {
        self.customers[client]
            .time_window()
            .copied()
            .unwrap_or_else(TimeWindow::unbounded)
    }

    fn service_duration(&self, client: usize) -> f64 {
        self.customers[client].service_duration()
    }

    fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    fn travel_time(&self, from: usize, to: usize) -> f64 {
        match &self.travel_times {
            Some(tt) => tt.get(from, to),
            None => self.distances.get(from, to),
        }
    }

    fn vehicle_capacity(&self) -> i32 {
        self.vehicle_capacity
    }
}
