use rand::seq::IteratorRandom;
use rand::Rng;

use crate::domain::solution::Solution;
use crate::domain::types::{ProblemInstance, Route};

/// Probability of attempting an inter-depot relocation.
const RELOCATION_PROBABILITY: f64 = 0.6;
/// Probability of attempting an intra-route 2-opt reversal.
const TWO_OPT_PROBABILITY: f64 = 0.8;

/// Produces one candidate neighbor of `current`. Never fails: when neither
/// move applies the result is a deep copy of `current`, a plateau step the
/// acceptance rule sees as a zero-delta move.
///
/// The two probability gates are drawn independently whenever at least one
/// route exists, and a relocation that aborts or produces an overweight
/// candidate still falls through to the 2-opt gate. Keeping this draw
/// order fixed is what makes runs reproducible for a given seed.
pub fn neighbor<R: Rng>(
    current: &Solution,
    instance: &ProblemInstance,
    rng: &mut R,
) -> Solution {
    let routes = current.routes();

    // Inter-depot relocation. Capacity-checked: an invalid candidate is
    // discarded rather than returned.
    if !routes.is_empty() && rng.gen::<f64>() < RELOCATION_PROBABILITY {
        if let Some(candidate) = relocate(routes, instance, rng) {
            return candidate;
        }
    }

    // Intra-route 2-opt. A reversal cannot change the route's load, so
    // capacity feasibility is invariant and goes unchecked here.
    if !routes.is_empty() && rng.gen::<f64>() < TWO_OPT_PROBABILITY {
        if let Some(candidate) = two_opt(routes, instance, rng) {
            return candidate;
        }
    }

    current.clone()
}

/// Moves one random customer from its route to a random position in a
/// different depot's route, opening that route if the depot was idle.
/// Returns `None` when the target depot equals the source (move aborted
/// with the draws already consumed) or the candidate is overweight.
fn relocate<R: Rng>(
    routes: &[Route],
    instance: &ProblemInstance,
    rng: &mut R,
) -> Option<Solution> {
    let source = rng.gen_range(0..routes.len());
    if routes[source].customers.is_empty() {
        return None;
    }

    let position = rng.gen_range(0..routes[source].customers.len());
    let target_depot = instance.depots[rng.gen_range(0..instance.depots.len())];
    if routes[source].depot == target_depot {
        return None;
    }

    let mut candidate = routes.to_vec();
    let moved = candidate[source].customers.remove(position);

    match candidate.iter().position(|r| r.depot == target_depot) {
        Some(target) => {
            let slot = rng.gen_range(0..=candidate[target].customers.len());
            candidate[target].customers.insert(slot, moved);
        }
        None => candidate.push(Route {
            depot: target_depot,
            customers: vec![moved],
        }),
    }

    candidate.retain(Route::is_active);
    let candidate = Solution::new(candidate, instance);
    candidate.is_valid().then_some(candidate)
}

/// Reverses a random inclusive span of one route's customer sequence.
fn two_opt<R: Rng>(routes: &[Route], instance: &ProblemInstance, rng: &mut R) -> Option<Solution> {
    let chosen = rng.gen_range(0..routes.len());
    let len = routes[chosen].customers.len();
    if len < 2 {
        return None;
    }

    let mut ends = (0..len).choose_multiple(rng, 2);
    ends.sort_unstable();
    let (i, j) = (ends[0], ends[1]);

    let mut candidate = routes.to_vec();
    candidate[chosen].customers[i..=j].reverse();
    Some(Solution::new(candidate, instance))
}
