//! Branching heuristics (spec.md §4.5): choose the next unassigned variable
//! and its phase. All heuristics recompute their statistics by scanning the
//! clause store on every decision, matching the full-rescan approach taken
//! by `propagator` — this keeps every policy a simple, obviously-correct
//! reduction over `(clause, not-yet-satisfied)` pairs rather than requiring
//! incremental bookkeeping through assignment/unassignment.

mod counting;
mod static_order;
mod vsids;

use std::collections::HashMap;

use clap::ValueEnum;

use crate::cnf::{Clause, Literal, VarId};
use crate::solver::assignment::Assignment;
use crate::solver::clause_store::ClauseStore;

pub use vsids::Vsids;

/// A branching heuristic: picks the next literal to assign as a decision.
/// Called only when at least one variable is unassigned.
pub trait Heuristic: std::fmt::Debug {
    fn decide(&mut self, store: &ClauseStore, assignment: &Assignment) -> Literal;

    /// Called once per learnt clause, after analysis. Only VSIDS-style
    /// heuristics use this; the default is a no-op.
    fn on_conflict(&mut self, _clause: &Clause) {}

    /// Called when the search restarts (spec.md §4.7: "resets VSIDS if
    /// used"). The default is a no-op; only VSIDS carries resettable state.
    fn on_restart(&mut self) {}

    /// Called whenever backtracking (backjump or restart) unassigns `var`.
    /// Heuristics that remove a variable from an internal queue on decision
    /// must use this to make it reachable again. The default is a no-op,
    /// since the full-rescan heuristics recompute their candidate set from
    /// `assignment` on every `decide()` call and carry no such queue.
    fn on_unassign(&mut self, _var: VarId) {}
}

#[derive(Debug, Copy, Clone, ValueEnum)]
#[clap(rename_all = "kebab_case")]
pub enum HeuristicKind {
    /// Lowest-indexed unassigned variable, phase TRUE.
    Ordered,
    /// Uniformly random unassigned variable and phase.
    Random,
    /// Dynamic Largest Individual Sum: the literal occurring in the most
    /// not-yet-satisfied clauses.
    Dlis,
    /// Randomized DLIS: ties for the largest individual sum are broken
    /// uniformly at random instead of by variable index.
    Rdlis,
    /// Dynamic Largest Combined Sum: the variable whose positive and
    /// negative occurrence counts sum highest; phase follows the more
    /// frequent sign.
    Dlcs,
    /// Randomized DLCS: ties broken uniformly at random.
    Rdlcs,
    /// Two-Clause: DLIS restricted to clauses with exactly two unassigned
    /// literals, falling back to plain DLIS when none remain.
    TwoClause,
    /// Maximum Occurrences in clauses of Minimum size.
    Mom,
    /// One-sided Jeroslow-Wang: literal maximizing
    /// sum of 2^-|clause| over not-yet-satisfied clauses containing it.
    Jw,
    /// Variable State Independent Decaying Sum.
    Vsids,
}

impl HeuristicKind {
    pub fn create(&self, num_vars: usize) -> Box<dyn Heuristic> {
        match self {
            HeuristicKind::Ordered => Box::new(static_order::Ordered),
            HeuristicKind::Random => Box::new(static_order::RandomChoice::default()),
            HeuristicKind::Dlis => Box::new(counting::Dlis { randomized: false }),
            HeuristicKind::Rdlis => Box::new(counting::Dlis { randomized: true }),
            HeuristicKind::Dlcs => Box::new(counting::Dlcs { randomized: false }),
            HeuristicKind::Rdlcs => Box::new(counting::Dlcs { randomized: true }),
            HeuristicKind::TwoClause => Box::new(counting::TwoClause),
            HeuristicKind::Mom => Box::new(counting::Mom),
            HeuristicKind::Jw => Box::new(counting::Jw),
            HeuristicKind::Vsids => Box::new(Vsids::init(num_vars)),
        }
    }
}

/// Counts, per literal, how many not-yet-satisfied clauses in `store`
/// contain it. A clause is "not yet satisfied" if none of its literals are
/// currently true (it may still contain falsified literals).
fn literal_counts(store: &ClauseStore, assignment: &Assignment) -> HashMap<Literal, usize> {
    let mut counts = HashMap::new();
    for (_, clause) in store.iter() {
        if is_satisfied(clause, assignment) {
            continue;
        }
        for &lit in unassigned_literals(clause, assignment) {
            *counts.entry(lit).or_insert(0) += 1;
        }
    }
    counts
}

/// Per-variable (positive count, negative count) across not-yet-satisfied
/// clauses, restricted to unassigned variables.
fn combined_counts(store: &ClauseStore, assignment: &Assignment) -> HashMap<VarId, (usize, usize)> {
    let mut counts: HashMap<VarId, (usize, usize)> = HashMap::new();
    for (_, clause) in store.iter() {
        if is_satisfied(clause, assignment) {
            continue;
        }
        for &lit in unassigned_literals(clause, assignment) {
            let entry = counts.entry(lit.var()).or_insert((0, 0));
            if lit.is_positive() {
                entry.0 += 1;
            } else {
                entry.1 += 1;
            }
        }
    }
    counts
}

fn is_satisfied(clause: &Clause, assignment: &Assignment) -> bool {
    clause
        .literals
        .iter()
        .any(|&lit| assignment.literal_value(lit) == Some(true))
}

fn unassigned_literals<'a>(
    clause: &'a Clause,
    assignment: &'a Assignment,
) -> impl Iterator<Item = &'a Literal> {
    clause
        .literals
        .iter()
        .filter(move |&&lit| assignment.literal_value(lit).is_none())
}

fn first_unassigned_var(assignment: &Assignment) -> VarId {
    assignment
        .unassigned_vars()
        .next()
        .expect("decide() is only called while an unassigned variable exists")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Clause;

    #[test]
    fn literal_counts_skip_satisfied_clauses() {
        let store = ClauseStore::init(vec![Clause::from("1 2"), Clause::from("-1 3")]);
        let mut assignment = Assignment::new(3);
        assignment.assign(Literal::new(1), 0, None).unwrap();
        let counts = literal_counts(&store, &assignment);
        // clause "1 2" is satisfied and excluded; clause "-1 3" is not
        // satisfied (its -1 literal is falsified) and contributes lit 3.
        assert_eq!(counts.get(&Literal::new(3)), Some(&1));
        assert!(counts.get(&Literal::new(2)).is_none());
    }
}
