use serde::Serialize;

use crate::domain::types::{Cost, ProblemInstance, Route};
use crate::evaluation::cost::{route_cost, route_demand};
use crate::evaluation::penalty::depot_shortfall_penalty;

/// A set of depot routes with its evaluation cached at construction.
///
/// Solutions are never mutated in place; every transformation builds a new
/// one. `Clone` deep-copies the route storage, so the search can hold a
/// current and a best solution at the same time without either being
/// corrupted through the other.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    routes: Vec<Route>,
    cost: Cost,
    is_valid: bool,
    available_depots: usize,
    penalty_value: f64,
}

impl Solution {
    /// Evaluates `routes` against `instance` eagerly: closed-tour base
    /// cost, active-route count, and the per-route capacity check.
    pub fn new(routes: Vec<Route>, instance: &ProblemInstance) -> Self {
        let base = routes.iter().map(|r| route_cost(r, instance)).sum();
        let active_routes = routes.iter().filter(|r| r.is_active()).count();
        let is_valid = routes
            .iter()
            .all(|r| route_demand(r, instance) <= instance.vehicle_capacity);

        Self {
            routes,
            cost: Cost { base, active_routes },
            is_valid,
            available_depots: instance.depots.len(),
            penalty_value: instance.penalty_value,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn cost(&self) -> Cost {
        self.cost
    }

    pub fn cost_base(&self) -> f64 {
        self.cost.base
    }

    pub fn active_routes(&self) -> usize {
        self.cost.active_routes
    }

    /// Capacity feasibility. Advisory: the relocation move consults it,
    /// the acceptance rule never does.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Penalized comparison cost: the base plus one fixed penalty whenever
    /// the active-route count differs from the available depot count.
    pub fn cost_total(&self) -> f64 {
        self.cost.base
            + depot_shortfall_penalty(
                self.cost.active_routes,
                self.available_depots,
                self.penalty_value,
            )
    }
}
