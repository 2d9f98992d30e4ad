//! Human-readable solution listing.

use std::fmt;

use crate::error::SolutionError;
use crate::models::ProblemInstance;

use super::cost::travelled;
use super::Solution;

/// Per-route listing with distance, demand and free capacity, followed by
/// the total distance.
///
/// ```text
/// ROUTE #0:
/// 0 - 1 - 2 - 0  Travelled distance: 20.00, Demand: 7, Free: 3
///
/// Total travelled distance: 20.00
/// ```
pub struct SolutionReport<'s, 'a, P: ProblemInstance + ?Sized> {
    solution: &'s Solution<'a, P>,
}

impl<P: ProblemInstance + ?Sized> fmt::Display for SolutionReport<'_, '_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sol = self.solution;
        let capacity = sol.instance.vehicle_capacity();
        for (i, (route, &free)) in sol.routes.iter().zip(&sol.free_capacities).enumerate() {
            writeln!(f, "ROUTE #{i}:")?;
            writeln!(
                f,
                "{}  Travelled distance: {:.2}, Demand: {}, Free: {}",
                join_route(route),
                travelled(sol.instance, route),
                capacity - free,
                free
            )?;
        }
        writeln!(f)?;
        write!(f, "Total travelled distance: {:.2}", sol.total_cost())
    }
}

fn join_route(route: &[usize]) -> String {
    route
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" - ")
}

impl<'a, P: ProblemInstance + ?Sized> Solution<'a, P> {
    /// The route as `"0 - 3 - 1 - 0"`.
    pub fn route_string(&self, route_index: usize) -> Result<String, SolutionError> {
        self.route(route_index).map(join_route)
    }

    /// A [`Display`](fmt::Display)able listing of every route.
    pub fn report(&self) -> SolutionReport<'_, 'a, P> {
        SolutionReport { solution: self }
    }
}
