//! Conflict analyzer (spec.md §4.4): derives a learnt clause at the First
//! Unique Implication Point and the level to backjump to. Reconstructs the
//! implication graph on demand by walking `(level, reason)` pairs rather
//! than maintaining a separate graph structure (spec.md §9).

use std::collections::HashSet;
use std::hash::BuildHasherDefault;

use fnv::FnvHasher;
use log::debug;

use crate::cnf::{Clause, ClauseId, Literal};
use crate::error::InternalError;
use crate::solver::assignment::Assignment;
use crate::solver::clause_store::ClauseStore;
use crate::solver::trail::Trail;

type FastHasher = BuildHasherDefault<FnvHasher>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    /// Conflict occurred at decision level 0: the formula is unsatisfiable.
    Unsat,
    Learnt { clause: Clause, backjump_level: usize },
}

/// Performs First-UIP conflict analysis on `conflict_clause_id`, which must
/// be falsified under the current assignment at the trail's current
/// (necessarily positive, or this returns `Unsat`) decision level.
pub fn analyze(
    conflict_clause_id: ClauseId,
    store: &ClauseStore,
    assignment: &Assignment,
    trail: &Trail,
) -> Analysis {
    let level = trail.decision_level;
    if level == 0 {
        return Analysis::Unsat;
    }

    let trail_literals: Vec<Literal> = trail.iter().collect();
    let mut seen: HashSet<usize, FastHasher> = HashSet::with_hasher(FastHasher::default());
    let mut older_literals: Vec<Literal> = Vec::new();
    let mut current_level_count: usize = 0;
    let mut current_reason_id = conflict_clause_id;
    let mut current_literal: Option<Literal> = None;
    let mut trail_pos = trail_literals.len();

    loop {
        let reason_clause = &store[current_reason_id];
        for &lit in &reason_clause.literals {
            if let Some(cur) = current_literal {
                if lit.var() == cur.var() {
                    continue;
                }
            }
            let lit_level = assignment.level_of(lit.var());
            if lit_level == 0 {
                // Forced unconditionally; every model already satisfies it, so
                // it never needs to appear in the learnt clause.
                continue;
            }
            if seen.insert(lit.var()) {
                if lit_level == level {
                    current_level_count += 1;
                } else {
                    older_literals.push(lit);
                }
            }
        }

        loop {
            trail_pos = trail_pos
                .checked_sub(1)
                .unwrap_or_else(|| panic!("{}", InternalError::AnalyzerFailedToReduce));
            if seen.contains(&trail_literals[trail_pos].var()) {
                break;
            }
        }
        let next = trail_literals[trail_pos];
        current_literal = Some(next);
        seen.remove(&next.var());
        current_level_count -= 1;

        if current_level_count == 0 {
            break;
        }

        current_reason_id = assignment
            .reason_of(next.var())
            .unwrap_or_else(|| panic!("{}", InternalError::AnalyzerFailedToReduce));
    }

    let uip = -current_literal.unwrap();
    debug!("First-UIP at level {level}: {uip}");

    let backjump_level = older_literals
        .iter()
        .map(|lit| assignment.level_of(lit.var()))
        .max()
        .unwrap_or(0);

    let mut clause_literals = older_literals;
    clause_literals.push(uip);

    let lbd = clause_literals
        .iter()
        .map(|lit| assignment.level_of(lit.var()))
        .collect::<HashSet<_>>()
        .len();

    Analysis::Learnt {
        clause: Clause::learnt(clause_literals, lbd),
        backjump_level,
    }
}
