use itertools::Itertools;
use std::iter::once;

use crate::domain::types::{ProblemInstance, Route};

/// Cost of the closed tour depot -> c1 -> ... -> cn -> depot, summing
/// directed edge costs. Inactive routes cost nothing.
pub fn route_cost(route: &Route, instance: &ProblemInstance) -> f64 {
    if !route.is_active() {
        return 0.0;
    }

    once(route.depot)
        .chain(route.customers.iter().copied())
        .chain(once(route.depot))
        .tuple_windows()
        .map(|(from, to)| instance.edge_cost(from, to))
        .sum()
}

/// Total demand loaded onto a route.
pub fn route_demand(route: &Route, instance: &ProblemInstance) -> u64 {
    route.customers.iter().map(|&c| instance.demands[c]).sum()
}
