use serde::{Deserialize, Serialize};

use crate::error::SolverError;

/// One delivery tour: an ordered customer sequence tied to a single depot.
/// The vehicle leaves the depot, visits the customers in order, and returns.
/// A route without customers is inactive and contributes no cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub depot: usize,
    pub customers: Vec<usize>,
}

impl Route {
    pub fn new(depot: usize) -> Self {
        Self {
            depot,
            customers: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.customers.is_empty()
    }
}

/// Base travel cost together with the active-route count it was computed
/// over. The depot-utilization penalty is applied only where an ordering
/// decision needs a single scalar, so the base stays reportable on its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cost {
    pub base: f64,
    pub active_routes: usize,
}

/// Immutable problem data shared by every solution of a run.
///
/// Depots and customers live in one dense index space; `node_labels` maps
/// indices back to caller-facing ids at the boundary. The cost matrix is
/// directed and is not required to be symmetric or metric.
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    pub node_labels: Vec<String>,
    pub depots: Vec<usize>,
    pub customers: Vec<usize>,
    pub demands: Vec<u64>,
    pub vehicle_capacity: u64,
    pub cost_matrix: Vec<Vec<f64>>,
    pub penalty_value: f64,
}

impl ProblemInstance {
    /// Validates the data up front: a malformed matrix, a missing demand
    /// entry, or a bad node partition fails the run here instead of deep
    /// inside the search loop.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        node_labels: Vec<String>,
        depots: Vec<usize>,
        customers: Vec<usize>,
        demands: Vec<u64>,
        vehicle_capacity: u64,
        cost_matrix: Vec<Vec<f64>>,
        penalty_value: f64,
    ) -> Result<Self, SolverError> {
        let nodes = node_labels.len();

        if vehicle_capacity == 0 {
            return Err(SolverError::ZeroCapacity);
        }
        if demands.len() != nodes {
            return Err(SolverError::DemandTableMismatch {
                expected: nodes,
                got: demands.len(),
            });
        }
        if cost_matrix.len() != nodes {
            return Err(SolverError::MalformedCostMatrix {
                expected: nodes,
                detail: format!("got {} rows", cost_matrix.len()),
            });
        }
        for (from, row) in cost_matrix.iter().enumerate() {
            if row.len() != nodes {
                return Err(SolverError::MalformedCostMatrix {
                    expected: nodes,
                    detail: format!("row {} has {} columns", from, row.len()),
                });
            }
            for (to, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(SolverError::InvalidEdgeCost { from, to, value });
                }
            }
        }

        let mut seen = vec![false; nodes];
        for &index in depots.iter().chain(customers.iter()) {
            if index >= nodes {
                return Err(SolverError::NodeOutOfRange { index, nodes });
            }
            if seen[index] {
                return Err(SolverError::DuplicateNodeRole { index });
            }
            seen[index] = true;
        }

        Ok(Self {
            node_labels,
            depots,
            customers,
            demands,
            vehicle_capacity,
            cost_matrix,
            penalty_value,
        })
    }

    pub fn node_count(&self) -> usize {
        self.node_labels.len()
    }

    pub fn edge_cost(&self, from: usize, to: usize) -> f64 {
        self.cost_matrix[from][to]
    }
}
