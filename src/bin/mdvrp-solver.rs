use std::error::Error;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mdvrp::config::constant::{
    COOLING_FACTOR, CUSTOMER_COUNT, DEPOT_COUNT, FINAL_TEMPERATURE, INITIAL_TEMPERATURE,
    ITERATIONS_PER_TEMPERATURE, SEED,
};
use mdvrp::evaluation::cost::route_cost;
use mdvrp::fixtures::data_generator::generate_random_instance;
use mdvrp::{AnnealingOptimizer, AnnealingParams, AnnealingSummary, ProblemInstance};

/// After the opening steps, log one progress sample this often.
const PROGRESS_INTERVAL: usize = 1000;
const OPENING_STEPS: usize = 10;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();

    info!(
        "Starting MDVRP annealing with {} depots and {} customers",
        DEPOT_COUNT, CUSTOMER_COUNT
    );

    let seed: u64 = SEED as u64;
    let instance = generate_random_instance(DEPOT_COUNT, CUSTOMER_COUNT, seed)?;

    let params = AnnealingParams {
        initial_temperature: INITIAL_TEMPERATURE,
        final_temperature: FINAL_TEMPERATURE,
        cooling_factor: COOLING_FACTOR,
        iterations_per_temperature: ITERATIONS_PER_TEMPERATURE,
    };
    let rng = ChaCha8Rng::seed_from_u64(seed);
    let mut optimizer = AnnealingOptimizer::new(&instance, params, rng)?;

    let summary = optimizer.run_with_observer(|progress| {
        let sampled = progress.iteration <= OPENING_STEPS
            || (progress.iteration - OPENING_STEPS) % PROGRESS_INTERVAL == 0;
        if sampled {
            info!(
                "step {:<6} cost={:.2} T={:.2}",
                progress.iteration, progress.cost_base, progress.temperature
            );
        }
    });

    report_summary(&summary, &instance);
    Ok(())
}

fn report_summary(summary: &AnnealingSummary, instance: &ProblemInstance) {
    let best = &summary.best;

    info!(
        "Annealing finished after {} iterations (final T = {:.3})",
        summary.iterations, summary.final_temperature
    );
    info!(
        "Accepted {} moves, {} of them improving",
        summary.accepted_moves, summary.improving_moves
    );
    info!(
        "Best cost: {:.2} using {} of {} depots (capacity-feasible: {})",
        best.cost_base(),
        best.active_routes(),
        instance.depots.len(),
        best.is_valid()
    );

    if !summary.unassigned.is_empty() {
        let labels: Vec<&str> = summary
            .unassigned
            .iter()
            .map(|&c| instance.node_labels[c].as_str())
            .collect();
        warn!(
            "{} customers could not be placed by the constructive heuristic: {:?}",
            labels.len(),
            labels
        );
    }

    let mut routes = best.routes().to_vec();
    routes.sort_by_key(|r| r.depot);
    for route in &routes {
        let stops: Vec<&str> = route
            .customers
            .iter()
            .map(|&c| instance.node_labels[c].as_str())
            .collect();
        info!(
            "{}: cost {:.2}, {} stops: {}",
            instance.node_labels[route.depot],
            route_cost(route, instance),
            route.customers.len(),
            stops.join(" -> ")
        );
    }
}
