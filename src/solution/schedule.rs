//! Forward time-window propagation.
//!
//! The service start `b_j` of client `j` following client `i` is
//!
//! ```text
//! b_j = max(e_j, b_i + s_i + t_ij)
//! ```
//!
//! where `e_j` is the ready time of `j`, `s_i` the service duration at `i`
//! and `t_ij` the travel time. Only the ready time is applied; due dates
//! are compared separately by [`Solution::check_time_windows`].
//!
//! # Reference
//!
//! Solomon, M.M. (1987). "Algorithms for the Vehicle Routing and Scheduling
//! Problems with Time Window Constraints", *Operations Research* 35(2), 254-265.

use tracing::{instrument, Level};

use crate::error::SolutionError;
use crate::models::ProblemInstance;

use super::{check_vertex, Solution};

/// Earliest service start at `j` when its predecessor `i` starts service at `bi`.
///
/// Returns `UnknownClient` if `i` or `j` is not a vertex of `instance`.
///
/// # Examples
///
/// ```
/// use vrptw_solution::models::{Customer, Instance, TimeWindow};
/// use vrptw_solution::distance::DistanceMatrix;
/// use vrptw_solution::solution::compute_starting_time;
///
/// let customers = vec![
///     Customer::depot(0.0, 0.0),
///     Customer::new(1, 0.0, 3.0, 1, 2.0),
///     Customer::new(2, 0.0, 6.0, 1, 0.0)
///         .with_time_window(TimeWindow::new(5.0, 20.0).unwrap()),
/// ];
/// let dm = DistanceMatrix::from_customers(&customers);
/// let instance = Instance::new(customers, dm, 10).unwrap();
///
/// // Arrives at 0 + 2 + 3 = 5, the window opens at 5.
/// assert_eq!(compute_starting_time(&instance, 1, 0.0, 2), Ok(5.0));
/// // Arrives at 10 + 2 + 3 = 15.
/// assert_eq!(compute_starting_time(&instance, 1, 10.0, 2), Ok(15.0));
/// ```
pub fn compute_starting_time<P: ProblemInstance + ?Sized>(
    instance: &P,
    i: usize,
    bi: f64,
    j: usize,
) -> Result<f64, SolutionError> {
    check_vertex(instance, i)?;
    check_vertex(instance, j)?;
    Ok(starting_time(instance, i, bi, j))
}

fn starting_time<P: ProblemInstance + ?Sized>(instance: &P, i: usize, bi: f64, j: usize) -> f64 {
    let ready = instance.time_window(j).ready();
    ready.max(bi + instance.service_duration(i) + instance.travel_time(i, j))
}

impl<P: ProblemInstance + ?Sized> Solution<'_, P> {
    /// Earliest service start at `j` after `i` started at `bi`.
    pub fn compute_starting_time(
        &self,
        i: usize,
        bi: f64,
        j: usize,
    ) -> Result<f64, SolutionError> {
        compute_starting_time(self.instance, i, bi, j)
    }

    /// Propagates service start times along route `route_index`.
    ///
    /// Returns a vector of length `num_vertices()` indexed by client ID.
    /// Entries are meaningful only for clients on this route; every other
    /// entry, including the depot, is `0.0`. Late arrivals are not flagged.
    #[instrument(skip(self), level = Level::TRACE)]
    pub fn propagate_route(&self, route_index: usize) -> Result<Vec<f64>, SolutionError> {
        let route = self.route(route_index)?;
        let mut starts = vec![0.0; self.num_vertices()];
        self.walk(route, &mut starts, |_, _| {});
        Ok(starts)
    }

    /// Returns the first `TimeWindowViolated` along route `route_index`.
    pub fn check_time_windows(&self, route_index: usize) -> Result<(), SolutionError> {
        match self.time_window_violations(route_index)?.into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }

    /// Every visit on route `route_index` whose service would start after
    /// its due date, in route order.
    pub fn time_window_violations(
        &self,
        route_index: usize,
    ) -> Result<Vec<SolutionError>, SolutionError> {
        let route = self.route(route_index)?;
        let mut starts = vec![0.0; self.num_vertices()];
        let mut violations = Vec::new();
        self.walk(route, &mut starts, |client, start| {
            let latest = self.instance.time_window(client).due();
            if start > latest {
                violations.push(SolutionError::TimeWindowViolated {
                    route_index,
                    client,
                    start,
                    latest,
                });
            }
        });
        Ok(violations)
    }

    /// Applies the recurrence to every interior position of `route`,
    /// reporting each computed `(client, start)`.
    fn walk(&self, route: &[usize], starts: &mut [f64], mut visit: impl FnMut(usize, f64)) {
        // Leading and trailing depot entries are not scheduled.
        for k in 1..route.len().saturating_sub(1) {
            let i = route[k - 1];
            let j = route[k];
            let start = starting_time(self.instance, i, starts[i], j);
            starts[j] = start;
            visit(j, start);
        }
    }
}
