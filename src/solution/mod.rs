//! VRPTW solution: route ledger plus feasibility and cost queries.
//!
//! A [`Solution`] is an append-only store of routes bound to a
//! [`ProblemInstance`]. Each route is a sequence of vertex IDs that by
//! convention starts and ends at the depot (`[0, c1, ..., ck, 0]`).
//! Inserting a route records its free capacity and adds its demand to the
//! global demand; nothing is validated beyond client IDs being known.
//!
//! Feasibility is *reported*, never enforced:
//!
//! - [`Solution::check_capacity`] compares a route's load with the vehicle capacity;
//! - [`Solution::propagate_route`] computes service start times by forward
//!   propagation and [`Solution::check_time_windows`] compares them with due dates;
//! - [`Solution::violations`] collects both kinds across all routes.
//!
//! Cost queries live in `cost`, flat array encodings in `encoding`, and the
//! human-readable listing in `report`.

mod cost;
mod encoding;
mod report;
mod schedule;

use std::fmt;

use tracing::debug;

use crate::error::SolutionError;
use crate::models::ProblemInstance;

pub use cost::route_cost;
pub use encoding::{routes_from_flattened, ClientPosition, RouteTable};
pub use report::SolutionReport;
pub use schedule::compute_starting_time;

/// A candidate VRPTW solution bound to a shared problem instance.
///
/// # Examples
///
/// ```
/// use vrptw_solution::models::{Customer, Instance};
/// use vrptw_solution::distance::DistanceMatrix;
/// use vrptw_solution::solution::Solution;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 1.0, 0.0, 3, 0.0),
///     Customer::new(2, 2.0, 0.0, 4, 0.0),
///     Customer::new(3, 0.0, 1.0, 2, 0.0),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
/// let instance = Instance::new(customers, dm, 10).unwrap();
///
/// let mut sol = Solution::new(&instance);
/// sol.insert_route(vec![0, 1, 2, 0]).unwrap();
/// sol.insert_route(vec![0, 3, 0]).unwrap();
/// assert_eq!(sol.free_capacities(), &[3, 8]);
/// assert_eq!(sol.global_demand(), 9);
/// ```
pub struct Solution<'a, P: ProblemInstance + ?Sized> {
    instance: &'a P,
    routes: Vec<Vec<usize>>,
    free_capacities: Vec<i32>,
    global_demand: i32,
}

impl<'a, P: ProblemInstance + ?Sized> Solution<'a, P> {
    /// Creates an empty solution for the given instance.
    pub fn new(instance: &'a P) -> Self {
        Self {
            instance,
            routes: Vec::new(),
            free_capacities: Vec::new(),
            global_demand: 0,
        }
    }

    /// The instance this solution is evaluated against.
    pub fn instance(&self) -> &'a P {
        self.instance
    }

    /// Number of vertices (clients plus depot).
    pub fn num_vertices(&self) -> usize {
        self.instance.num_vertices()
    }

    /// Appends a route and records its free capacity and demand.
    ///
    /// Over-capacity routes are stored as-is. A route naming a vertex
    /// outside the instance, or whose demand does not fit the `i32` ledger,
    /// is rejected and the solution is left unchanged.
    pub fn insert_route(&mut self, route: Vec<usize>) -> Result<(), SolutionError> {
        for &client in &route {
            self.check_client(client)?;
        }

        let route_index = self.routes.len();
        let overflow = SolutionError::DemandOverflow { route_index };
        let demand = route_demand(self.instance, &route).ok_or(overflow.clone())?;
        let free = self
            .instance
            .vehicle_capacity()
            .checked_sub(demand)
            .ok_or(overflow.clone())?;
        let global_demand = self.global_demand.checked_add(demand).ok_or(overflow)?;

        self.routes.push(route);
        self.free_capacities.push(free);
        self.global_demand = global_demand;

        debug!(route_index, demand, free_capacity = free, "inserted route");
        if free < 0 {
            debug!(
                route_index,
                demand,
                capacity = self.instance.vehicle_capacity(),
                "stored route exceeds vehicle capacity"
            );
        }
        Ok(())
    }

    /// Keeps the candidates whose client demand fits the free capacity of
    /// route `route_index`.
    ///
    /// Order is preserved and metadata is passed through untouched. Only
    /// capacity is considered; time windows are a separate check.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vrptw_solution::models::{Customer, Instance};
    /// # use vrptw_solution::distance::DistanceMatrix;
    /// # use vrptw_solution::solution::Solution;
    /// # let customers = vec![
    /// #     Customer::depot(0.0, 0.0),
    /// #     Customer::new(1, 1.0, 0.0, 3, 0.0),
    /// #     Customer::new(2, 2.0, 0.0, 4, 0.0),
    /// #     Customer::new(3, 0.0, 1.0, 2, 0.0),
    /// # ];
    /// # let dm = DistanceMatrix::from_customers(&customers);
    /// # let instance = Instance::new(customers, dm, 10).unwrap();
    /// let mut sol = Solution::new(&instance);
    /// sol.insert_route(vec![0, 1, 2, 0]).unwrap(); // free capacity 3
    ///
    /// let kept = sol
    ///     .filter_by_remaining_capacity(vec![(2, "b"), (3, "c"), (1, "a")], 0)
    ///     .unwrap();
    /// assert_eq!(kept, vec![(3, "c"), (1, "a")]);
    /// ```
    pub fn filter_by_remaining_capacity<T>(
        &self,
        candidates: impl IntoIterator<Item = (usize, T)>,
        route_index: usize,
    ) -> Result<Vec<(usize, T)>, SolutionError> {
        let free = self.free_capacity(route_index)?;
        candidates
            .into_iter()
            .filter_map(|(client, meta)| match self.check_client(client) {
                Err(e) => Some(Err(e)),
                Ok(()) => (self.instance.demand(client) <= free).then_some(Ok((client, meta))),
            })
            .collect()
    }

    /// Returns `CapacityExceeded` if route `route_index` carries more than
    /// the vehicle capacity.
    pub fn check_capacity(&self, route_index: usize) -> Result<(), SolutionError> {
        let free = self.free_capacity(route_index)?;
        if free < 0 {
            let capacity = self.instance.vehicle_capacity();
            return Err(SolutionError::CapacityExceeded {
                route_index,
                demand: capacity - free,
                capacity,
            });
        }
        Ok(())
    }

    /// Returns `true` if no stored route exceeds the vehicle capacity.
    pub fn is_capacity_feasible(&self) -> bool {
        self.free_capacities.iter().all(|&free| free >= 0)
    }

    /// All capacity and time-window violations, route by route.
    pub fn violations(&self) -> Vec<SolutionError> {
        let mut all = Vec::new();
        for route_index in 0..self.routes.len() {
            if let Err(e) = self.check_capacity(route_index) {
                all.push(e);
            }
            if let Ok(mut tw) = self.time_window_violations(route_index) {
                all.append(&mut tw);
            }
        }
        all
    }

    /// The stored routes, in insertion order.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// The route at `route_index`.
    pub fn route(&self, route_index: usize) -> Result<&[usize], SolutionError> {
        self.routes
            .get(route_index)
            .map(Vec::as_slice)
            .ok_or(SolutionError::RouteIndexOutOfRange {
                route_index,
                num_routes: self.routes.len(),
            })
    }

    /// Number of stored routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Free capacity of every route, parallel to [`routes`](Self::routes).
    ///
    /// Negative entries mark over-capacity routes.
    pub fn free_capacities(&self) -> &[i32] {
        &self.free_capacities
    }

    /// Free capacity of route `route_index`.
    pub fn free_capacity(&self, route_index: usize) -> Result<i32, SolutionError> {
        self.free_capacities
            .get(route_index)
            .copied()
            .ok_or(SolutionError::RouteIndexOutOfRange {
                route_index,
                num_routes: self.routes.len(),
            })
    }

    /// Sum of the demand of every inserted route.
    pub fn global_demand(&self) -> i32 {
        self.global_demand
    }

    fn check_client(&self, client: usize) -> Result<(), SolutionError> {
        check_vertex(self.instance, client)
    }
}

/// Returns `UnknownClient` unless `client` is a vertex of `instance`.
pub(crate) fn check_vertex<P: ProblemInstance + ?Sized>(
    instance: &P,
    client: usize,
) -> Result<(), SolutionError> {
    let num_vertices = instance.num_vertices();
    if client >= num_vertices {
        return Err(SolutionError::UnknownClient {
            client,
            num_vertices,
        });
    }
    Ok(())
}

/// Sum of client demands along a route, or `None` if it overflows `i32`.
///
/// Every client must be a vertex of `instance`.
pub fn route_demand<P: ProblemInstance + ?Sized>(instance: &P, route: &[usize]) -> Option<i32> {
    route
        .iter()
        .try_fold(0i32, |acc, &c| acc.checked_add(instance.demand(c)))
}

// Manual impls: the instance is only borrowed, so `P` need not be `Clone`/`Debug`.
impl<P: ProblemInstance + ?Sized> Clone for Solution<'_, P> {
    fn clone(&self) -> Self {
        Self {
            instance: self.instance,
            routes: self.routes.clone(),
            free_capacities: self.free_capacities.clone(),
            global_demand: self.global_demand,
        }
    }
}

impl<P: ProblemInstance + ?Sized> fmt::Debug for Solution<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solution")
            .field("routes", &self.routes)
            .field("free_capacities", &self.free_capacities)
            .field("global_demand", &self.global_demand)
            .finish()
    }
}
