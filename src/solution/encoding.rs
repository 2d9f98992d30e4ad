//! Flat two-row encodings of a solution's routes.
//!
//! Array-oriented algorithms consume a solution as a 2×W table instead of
//! nested route sequences. Row 0 always holds a route index; the meaning
//! of row 1 depends on the encoding:
//!
//! | encoding | width | row 1 |
//! |---|---|---|
//! | [`client_position_table`](Solution::client_position_table) | `V` | 1-based position, column = client |
//! | [`route_membership_table`](Solution::route_membership_table) | `V - 1` | client, depots skipped |
//! | [`flattened_routes_table`](Solution::flattened_routes_table) | `V - 1 + 2R` | client, depots kept |
//!
//! where `V` is the number of vertices and `R` the number of routes.
//! Unwritten columns are zero.

use serde::{Deserialize, Serialize};
use tracing::{instrument, Level};

use crate::error::SolutionError;
use crate::models::ProblemInstance;

use super::Solution;

/// A 2×W table: a route-index row and a value row.
///
/// `populated()` counts the columns written by walking the routes; any
/// columns past it are zero padding. `num_routes()` is the number of routes
/// encoded, so routes that wrote no column are still accounted for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRouteTable")]
pub struct RouteTable {
    route_row: Vec<usize>,
    value_row: Vec<usize>,
    populated: usize,
    num_routes: usize,
}

#[derive(Deserialize)]
struct RawRouteTable {
    route_row: Vec<usize>,
    value_row: Vec<usize>,
    populated: usize,
    num_routes: usize,
}

impl TryFrom<RawRouteTable> for RouteTable {
    type Error = SolutionError;

    fn try_from(raw: RawRouteTable) -> Result<Self, Self::Error> {
        if raw.route_row.len() != raw.value_row.len() || raw.populated > raw.route_row.len() {
            return Err(SolutionError::MalformedTable {
                route_row: raw.route_row.len(),
                value_row: raw.value_row.len(),
                populated: raw.populated,
            });
        }
        Ok(Self {
            route_row: raw.route_row,
            value_row: raw.value_row,
            populated: raw.populated,
            num_routes: raw.num_routes,
        })
    }
}

impl RouteTable {
    fn zeroed(width: usize, num_routes: usize) -> Self {
        Self {
            route_row: vec![0; width],
            value_row: vec![0; width],
            populated: 0,
            num_routes,
        }
    }

    /// Writes the next column in walk order, growing the table if the
    /// routes hold more entries than the nominal width.
    fn push(&mut self, route_index: usize, value: usize) {
        let k = self.populated;
        if k < self.route_row.len() {
            self.route_row[k] = route_index;
            self.value_row[k] = value;
        } else {
            self.route_row.push(route_index);
            self.value_row.push(value);
        }
        self.populated += 1;
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.route_row.len()
    }

    /// Number of columns written by the route walk.
    pub fn populated(&self) -> usize {
        self.populated
    }

    /// Number of routes in the encoded solution.
    pub fn num_routes(&self) -> usize {
        self.num_routes
    }

    /// Row 0: route indices.
    pub fn route_row(&self) -> &[usize] {
        &self.route_row
    }

    /// Row 1: positions or client IDs, depending on the encoding.
    pub fn value_row(&self) -> &[usize] {
        &self.value_row
    }

    /// Column `k` as `(route_index, value)`.
    pub fn column(&self, k: usize) -> Option<(usize, usize)> {
        Some((*self.route_row.get(k)?, *self.value_row.get(k)?))
    }
}

/// Where a client sits in a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientPosition {
    /// Index of the owning route.
    pub route_index: usize,
    /// 1-based rank within the route, depot endpoints excluded.
    pub position: usize,
}

/// Interior entries of a route (leading and trailing depot dropped).
fn interior(route: &[usize]) -> &[usize] {
    if route.len() < 2 {
        &[]
    } else {
        &route[1..route.len() - 1]
    }
}

impl<P: ProblemInstance + ?Sized> Solution<'_, P> {
    /// Client-indexed table: column `c` holds the route owning `c` and its
    /// 1-based position there.
    ///
    /// The depot and unvisited clients read `(0, 0)`; use
    /// [`client_positions`](Self::client_positions) to tell them apart.
    #[instrument(skip_all, level = Level::TRACE)]
    pub fn client_position_table(&self) -> RouteTable {
        let mut table = RouteTable::zeroed(self.num_vertices(), self.routes.len());
        for (client, position) in self.client_positions().into_iter().enumerate() {
            if let Some(p) = position {
                table.route_row[client] = p.route_index;
                table.value_row[client] = p.position;
            }
        }
        table.populated = table.width();
        table
    }

    /// Same content as [`client_position_table`](Self::client_position_table)
    /// with `None` for the depot and unvisited clients.
    pub fn client_positions(&self) -> Vec<Option<ClientPosition>> {
        let mut positions = vec![None; self.num_vertices()];
        for (route_index, route) in self.routes.iter().enumerate() {
            for (rank, &client) in interior(route).iter().enumerate() {
                positions[client] = Some(ClientPosition {
                    route_index,
                    position: rank + 1,
                });
            }
        }
        positions
    }

    /// Lists visited clients in route order then intra-route order:
    /// row 0 = route index, row 1 = client. Width is `V - 1`.
    #[instrument(skip_all, level = Level::TRACE)]
    pub fn route_membership_table(&self) -> RouteTable {
        let width = self.num_vertices().saturating_sub(1);
        let mut table = RouteTable::zeroed(width, self.routes.len());
        for (route_index, route) in self.routes.iter().enumerate() {
            for &client in interior(route) {
                table.push(route_index, client);
            }
        }
        table
    }

    /// Lists every route entry, depot endpoints included: row 0 = route
    /// index, row 1 = client. Width is `V - 1 + 2R`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use vrptw_solution::models::{Customer, Instance};
    /// # use vrptw_solution::distance::DistanceMatrix;
    /// use vrptw_solution::solution::{routes_from_flattened, Solution};
    /// # let customers = vec![
    /// #     Customer::depot(0.0, 0.0),
    /// #     Customer::new(1, 1.0, 0.0, 1, 0.0),
    /// #     Customer::new(2, 2.0, 0.0, 1, 0.0),
    /// #     Customer::new(3, 0.0, 1.0, 1, 0.0),
    /// # ];
    /// # let dm = DistanceMatrix::from_customers(&customers);
    /// # let instance = Instance::new(customers, dm, 10).unwrap();
    /// let mut sol = Solution::new(&instance);
    /// sol.insert_route(vec![0, 2, 1, 0]).unwrap();
    /// sol.insert_route(vec![0, 3, 0]).unwrap();
    ///
    /// let table = sol.flattened_routes_table();
    /// assert_eq!(table.route_row(), &[0, 0, 0, 0, 1, 1, 1]);
    /// assert_eq!(table.value_row(), &[0, 2, 1, 0, 0, 3, 0]);
    /// assert_eq!(routes_from_flattened(&table), sol.routes());
    /// ```
    #[instrument(skip_all, level = Level::TRACE)]
    pub fn flattened_routes_table(&self) -> RouteTable {
        let width = self.num_vertices().saturating_sub(1) + 2 * self.routes.len();
        let mut table = RouteTable::zeroed(width, self.routes.len());
        for (route_index, route) in self.routes.iter().enumerate() {
            for &client in route {
                table.push(route_index, client);
            }
        }
        table
    }
}

/// Rebuilds routes from a [`flattened_routes_table`](Solution::flattened_routes_table).
///
/// Each populated column is appended to the route named in row 0, so routes
/// without entries come back empty at their original index. Padding columns
/// and route indices past `num_routes()` are ignored.
pub fn routes_from_flattened(table: &RouteTable) -> Vec<Vec<usize>> {
    let mut routes: Vec<Vec<usize>> = vec![Vec::new(); table.num_routes];
    for k in 0..table.populated {
        let Some((route_index, client)) = table.column(k) else {
            break;
        };
        if let Some(route) = routes.get_mut(route_index) {
            route.push(client);
        }
    }
    routes
}
