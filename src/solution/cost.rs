//! Travelled-distance cost.

use crate::error::SolutionError;
use crate::models::ProblemInstance;

use super::{check_vertex, Solution};

/// Total distance along consecutive pairs of `route`, depot legs included.
///
/// A depot-only route `[0, 0]` costs `distance(0, 0)`. Returns
/// `UnknownClient` if the route names a vertex outside `instance`.
pub fn route_cost<P: ProblemInstance + ?Sized>(
    instance: &P,
    route: &[usize],
) -> Result<f64, SolutionError> {
    for &client in route {
        check_vertex(instance, client)?;
    }
    Ok(travelled(instance, route))
}

/// Leg sum over a route whose vertices are already known to be valid.
pub(super) fn travelled<P: ProblemInstance + ?Sized>(instance: &P, route: &[usize]) -> f64 {
    route
        .windows(2)
        .map(|leg| instance.distance(leg[0], leg[1]))
        .sum()
}

impl<P: ProblemInstance + ?Sized> Solution<'_, P> {
    /// Distance travelled along `route` under this solution's instance.
    pub fn route_cost(&self, route: &[usize]) -> Result<f64, SolutionError> {
        route_cost(self.instance, route)
    }

    /// Sum of [`route_cost`](Self::route_cost) over all routes. Lower is better.
    ///
    /// No penalty terms are added for infeasible routes.
    pub fn total_cost(&self) -> f64 {
        // Stored routes were checked on insertion.
        self.routes.iter().map(|r| travelled(self.instance, r)).sum()
    }
}
