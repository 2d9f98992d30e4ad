//! Property-based tests for the solution ledger, propagation, cost and encodings.
//!
//! # Invariants tested
//!
//! - **Ledger:** free capacity per route and global demand match the route demands.
//! - **Propagation:** deterministic, and non-decreasing along a route.
//! - **Cost:** total cost is the sum of route costs.
//! - **Encoding:** the flattened table decodes back to the original routes.

use proptest::collection::vec;
use proptest::prelude::*;

use vrptw_solution::distance::DistanceMatrix;
use vrptw_solution::models::{Customer, Instance, ProblemInstance, TimeWindow};
use vrptw_solution::solution::{route_cost, routes_from_flattened, Solution};

/// A random instance together with a partition of its clients into routes.
#[derive(Debug, Clone)]
struct Scenario {
    instance: Instance,
    routes: Vec<Vec<usize>>,
}

fn scenario_strategy() -> impl Strategy<Value = Scenario> {
    (1usize..12)
        .prop_flat_map(|n| {
            (
                vec((0.0f64..100.0, 0.0f64..100.0), n + 1),
                vec(0i32..10, n),
                vec(0.0f64..5.0, n),
                vec(0.0f64..50.0, n),
                Just((1..=n).collect::<Vec<usize>>()).prop_shuffle(),
                vec(any::<bool>(), n),
                1i32..40,
            )
        })
        .prop_map(|(coords, demands, services, readies, order, cuts, capacity)| {
            let mut customers = vec![Customer::depot(coords[0].0, coords[0].1)];
            for k in 0..demands.len() {
                let tw = TimeWindow::new(readies[k], readies[k] + 100.0).expect("finite window");
                customers.push(
                    Customer::new(k + 1, coords[k + 1].0, coords[k + 1].1, demands[k], services[k])
                        .with_time_window(tw),
                );
            }
            let dm = DistanceMatrix::from_customers(&customers);
            let instance = Instance::new(customers, dm, capacity).expect("valid instance");

            let mut routes = Vec::new();
            let mut current = vec![0];
            for (client, cut) in order.into_iter().zip(cuts) {
                current.push(client);
                if cut {
                    current.push(0);
                    routes.push(std::mem::replace(&mut current, vec![0]));
                }
            }
            if current.len() > 1 {
                current.push(0);
                routes.push(current);
            }
            Scenario { instance, routes }
        })
}

fn build<'a>(instance: &'a Instance, routes: &[Vec<usize>]) -> Solution<'a, Instance> {
    let mut sol = Solution::new(instance);
    for route in routes {
        sol.insert_route(route.clone()).expect("known clients");
    }
    sol
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: every route's free capacity is capacity minus its demand.
    #[test]
    fn free_capacity_matches_route_demand(s in scenario_strategy()) {
        let sol = build(&s.instance, &s.routes);
        let capacity = s.instance.vehicle_capacity();
        prop_assert_eq!(sol.free_capacities().len(), sol.num_routes());
        for (route, &free) in s.routes.iter().zip(sol.free_capacities()) {
            let demand: i32 = route.iter().map(|&c| s.instance.demand(c)).sum();
            prop_assert_eq!(free, capacity - demand);
        }
    }

    /// Property: global demand is the sum over routes, whatever the insertion order.
    #[test]
    fn global_demand_is_order_independent(s in scenario_strategy()) {
        let forward = build(&s.instance, &s.routes);
        let reversed: Vec<_> = s.routes.iter().rev().cloned().collect();
        let backward = build(&s.instance, &reversed);
        let capacity = s.instance.vehicle_capacity();
        let used: i32 = forward.free_capacities().iter().map(|f| capacity - f).sum();
        prop_assert_eq!(forward.global_demand(), used);
        prop_assert_eq!(forward.global_demand(), backward.global_demand());
    }

    /// Property: propagation is idempotent and start times never decrease along a route.
    #[test]
    fn propagation_is_idempotent_and_monotone(s in scenario_strategy()) {
        let sol = build(&s.instance, &s.routes);
        for (r, route) in s.routes.iter().enumerate() {
            let starts = sol.propagate_route(r).expect("route exists");
            let again = sol.propagate_route(r).expect("route exists");
            prop_assert_eq!(&starts, &again);
            let interior = &route[1..route.len() - 1];
            for pair in interior.windows(2) {
                prop_assert!(starts[pair[0]] <= starts[pair[1]]);
            }
            for &c in interior {
                prop_assert!(starts[c] >= s.instance.time_window(c).ready());
            }
        }
    }

    /// Property: total cost equals the sum of individual route costs.
    #[test]
    fn total_cost_is_sum_of_route_costs(s in scenario_strategy()) {
        let sol = build(&s.instance, &s.routes);
        let sum: f64 = s
            .routes
            .iter()
            .map(|r| route_cost(&s.instance, r).expect("known clients"))
            .sum();
        prop_assert!((sol.total_cost() - sum).abs() < 1e-9);
    }

    /// Property: decoding the flattened table reproduces the routes exactly.
    #[test]
    fn flattened_table_round_trips(s in scenario_strategy()) {
        let sol = build(&s.instance, &s.routes);
        let table = sol.flattened_routes_table();
        prop_assert_eq!(table.width(), s.instance.num_clients() + 2 * s.routes.len());
        prop_assert_eq!(table.populated(), table.width());
        prop_assert_eq!(routes_from_flattened(&table), s.routes);
    }

    /// Property: with every client visited once, each encoding places every client.
    #[test]
    fn encodings_agree_on_ownership(s in scenario_strategy()) {
        let sol = build(&s.instance, &s.routes);
        let positions = sol.client_positions();
        let membership = sol.route_membership_table();
        prop_assert_eq!(membership.populated(), s.instance.num_clients());
        for k in 0..membership.width() {
            let (route_index, client) = membership.column(k).expect("in range");
            let position = positions[client].expect("visited");
            prop_assert_eq!(position.route_index, route_index);
            prop_assert_eq!(s.routes[route_index][position.position], client);
        }
        prop_assert!(positions[0].is_none());
    }
}
