use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::solution::Solution;
use crate::domain::types::{ProblemInstance, Route};

/// Constructive start state plus the customers no depot could take.
#[derive(Debug)]
pub struct InitialSolution {
    pub solution: Solution,
    /// Customers left out because no depot had remaining capacity for
    /// them. Best effort by design; callers decide whether this is fatal.
    pub unassigned: Vec<usize>,
}

/// Greedy nearest-feasible-depot construction.
///
/// Customers are taken in shuffled order; each goes to the depot with the
/// cheapest depot-to-customer edge among those that still have capacity
/// for it. Ties break to the first depot in instance order that reaches
/// the minimum. Customers nobody can take are reported back, not assigned.
pub fn build_initial<R: Rng>(instance: &ProblemInstance, rng: &mut R) -> InitialSolution {
    let mut order = instance.customers.clone();
    order.shuffle(rng);

    let mut assigned: Vec<Vec<usize>> = vec![Vec::new(); instance.depots.len()];
    let mut loads: Vec<u64> = vec![0; instance.depots.len()];
    let mut unassigned = Vec::new();

    for customer in order {
        let demand = instance.demands[customer];
        let mut best: Option<usize> = None;
        let mut best_cost = f64::INFINITY;

        for (slot, &depot) in instance.depots.iter().enumerate() {
            if loads[slot] + demand > instance.vehicle_capacity {
                continue;
            }
            let cost = instance.edge_cost(depot, customer);
            if cost < best_cost {
                best_cost = cost;
                best = Some(slot);
            }
        }

        match best {
            Some(slot) => {
                assigned[slot].push(customer);
                loads[slot] += demand;
            }
            None => unassigned.push(customer),
        }
    }

    let routes: Vec<Route> = instance
        .depots
        .iter()
        .zip(assigned)
        .filter(|(_, customers)| !customers.is_empty())
        .map(|(&depot, customers)| Route { depot, customers })
        .collect();

    InitialSolution {
        solution: Solution::new(routes, instance),
        unassigned,
    }
}
