use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::config::constant::PENALTY_VALUE;
use crate::domain::types::ProblemInstance;
use crate::error::SolverError;

const AREA_SIZE: f64 = 100.0;
const CAPACITY_SLACK: f64 = 1.25;

/// Generates a seeded synthetic instance: depots and customers scattered
/// uniformly on a square, Euclidean edge costs, random per-customer
/// demands, and a homogeneous vehicle capacity sized so the fleet covers
/// total demand with some slack.
pub fn generate_random_instance(
    num_depots: usize,
    num_customers: usize,
    seed: u64,
) -> Result<ProblemInstance, SolverError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let nodes = num_depots + num_customers;

    let points: Vec<(f64, f64)> = (0..nodes)
        .map(|_| (rng.gen_range(0.0..AREA_SIZE), rng.gen_range(0.0..AREA_SIZE)))
        .collect();

    let cost_matrix: Vec<Vec<f64>> = points
        .iter()
        .map(|&(x1, y1)| {
            points
                .iter()
                .map(|&(x2, y2)| ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt())
                .collect()
        })
        .collect();

    let mut node_labels = Vec::with_capacity(nodes);
    let mut demands = Vec::with_capacity(nodes);
    for i in 0..num_depots {
        node_labels.push(format!("D{:02}", i + 1));
        demands.push(0);
    }
    for i in 0..num_customers {
        node_labels.push(format!("C{:02}", i + 1));
        demands.push(rng.gen_range(10..=30));
    }

    let total_demand: u64 = demands.iter().sum();
    let vehicle_capacity =
        (((total_demand as f64) * CAPACITY_SLACK / num_depots.max(1) as f64).ceil() as u64).max(1);

    info!(
        "Generated instance: {} depots, {} customers, total demand {}",
        num_depots, num_customers, total_demand
    );
    info!("Vehicle capacity: {}", vehicle_capacity);

    let fleet_capacity = vehicle_capacity * num_depots as u64;
    if fleet_capacity < total_demand {
        warn!(
            "Total fleet capacity ({}) is below total demand ({}); some customers may stay unassigned",
            fleet_capacity, total_demand
        );
    }

    ProblemInstance::new(
        node_labels,
        (0..num_depots).collect(),
        (num_depots..nodes).collect(),
        demands,
        vehicle_capacity,
        cost_matrix,
        PENALTY_VALUE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_a_consistent_instance() {
        let instance = generate_random_instance(3, 20, 64).unwrap();
        assert_eq!(instance.node_count(), 23);
        assert_eq!(instance.depots.len(), 3);
        assert_eq!(instance.customers.len(), 20);
        for &d in &instance.depots {
            assert_eq!(instance.demands[d], 0);
        }
        for &c in &instance.customers {
            assert!((10..=30).contains(&instance.demands[c]));
        }
        // Euclidean costs: zero diagonal, symmetric.
        assert_eq!(instance.edge_cost(5, 5), 0.0);
        assert_eq!(instance.edge_cost(1, 7), instance.edge_cost(7, 1));
    }

    #[test]
    fn same_seed_reproduces_the_instance() {
        let a = generate_random_instance(2, 10, 7).unwrap();
        let b = generate_random_instance(2, 10, 7).unwrap();
        assert_eq!(a.demands, b.demands);
        assert_eq!(a.cost_matrix, b.cost_matrix);
        assert_eq!(a.vehicle_capacity, b.vehicle_capacity);
    }
}
