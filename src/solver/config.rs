//! Solver configuration (spec.md §4.5/§4.7): which branching heuristic and
//! restart policy to use, and an optional conflict budget.

use crate::solver::heuristic::HeuristicKind;
use crate::solver::restarts::RestartPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub heuristic: HeuristicKind,
    pub restart_policy: RestartPolicy,
    /// Aborts the search once this many conflicts have been seen, if set.
    /// Used by the benchmark harness to bound runaway instances.
    pub conflict_budget: Option<usize>,
}

impl Config {
    pub fn new(
        heuristic: HeuristicKind,
        restart_policy: RestartPolicy,
        conflict_budget: Option<usize>,
    ) -> Self {
        Config {
            heuristic,
            restart_policy,
            conflict_budget,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            heuristic: HeuristicKind::Vsids,
            restart_policy: RestartPolicy::Luby,
            conflict_budget: None,
        }
    }
}
