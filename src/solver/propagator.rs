//! Unit propagator (spec.md §4.3): scans the clause store against the
//! current partial assignment and enqueues forced literals until
//! saturation or conflict.
//!
//! This implementation follows the full-rescan algorithm spelled out in
//! spec.md literally: each pass classifies every clause, stops the instant
//! a falsified clause is found, and otherwise applies every unit found in
//! that pass before scanning again. Two-watched-literals is explicitly
//! permitted as a faster drop-in (spec.md §4.3), but the externally
//! observable contract — termination, the unique closure of forced
//! literals, a falsified clause returned iff one exists in that closure —
//! is what callers may depend on, so this simpler form is sufficient.

use std::collections::HashMap;

use log::trace;

use crate::cnf::{ClauseId, Literal, VarId};
use crate::solver::assignment::Assignment;
use crate::solver::clause_store::ClauseStore;
use crate::solver::trail::Trail;

enum ClauseStatus {
    Satisfied,
    Falsified,
    Unit(Literal),
    Pending,
}

fn classify(literals: &[Literal], assignment: &Assignment) -> ClauseStatus {
    let mut unassigned_count = 0;
    let mut unassigned_lit = None;
    for &lit in literals {
        match assignment.literal_value(lit) {
            Some(true) => return ClauseStatus::Satisfied,
            Some(false) => {}
            None => {
                unassigned_count += 1;
                unassigned_lit = Some(lit);
            }
        }
    }
    match unassigned_count {
        0 => ClauseStatus::Falsified,
        1 => ClauseStatus::Unit(unassigned_lit.unwrap()),
        _ => ClauseStatus::Pending,
    }
}

/// Runs unit propagation to a fixed point. Returns the id of a falsified
/// clause if a conflict is reached, `None` once propagation saturates.
pub fn propagate(
    store: &ClauseStore,
    assignment: &mut Assignment,
    trail: &mut Trail,
) -> Option<ClauseId> {
    loop {
        let mut units: Vec<(Literal, ClauseId)> = Vec::new();
        let mut forced_this_pass: HashMap<VarId, bool> = HashMap::new();

        for (clause_id, clause) in store.iter() {
            match classify(&clause.literals, assignment) {
                ClauseStatus::Falsified => {
                    trace!("propagation found conflict in clause {clause_id}");
                    return Some(clause_id);
                }
                ClauseStatus::Unit(lit) => {
                    if let Some(&existing_sign) = forced_this_pass.get(&lit.var()) {
                        if existing_sign != lit.is_positive() {
                            trace!(
                                "propagation found conflicting forced literals on variable {}",
                                lit.var()
                            );
                            return Some(clause_id);
                        }
                        // Same literal forced again: the first reason already recorded wins.
                    } else {
                        forced_this_pass.insert(lit.var(), lit.is_positive());
                        units.push((lit, clause_id));
                    }
                }
                ClauseStatus::Satisfied | ClauseStatus::Pending => {}
            }
        }

        if units.is_empty() {
            return None;
        }

        for (lit, reason) in units {
            if assignment.is_assigned(lit.var()) {
                continue;
            }
            trace!("unit propagation: {lit} forced by clause {reason}");
            assignment
                .assign(lit, trail.decision_level, Some(reason))
                .expect("unit propagation assigned an already-assigned variable");
            trail.push_propagated(lit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Clause;

    #[test]
    fn saturates_with_no_units() {
        let store = ClauseStore::init(vec![Clause::from("1 2 3")]);
        let mut assignment = Assignment::new(3);
        let mut trail = Trail::new();
        assert!(propagate(&store, &mut assignment, &mut trail).is_none());
        assert_eq!(trail.len(), 0);
    }

    #[test]
    fn propagates_a_chain_of_units() {
        let store = ClauseStore::init(vec![
            Clause::from("1"),
            Clause::from("-1 2"),
            Clause::from("-2 3"),
        ]);
        let mut assignment = Assignment::new(3);
        let mut trail = Trail::new();
        let conflict = propagate(&store, &mut assignment, &mut trail);
        assert!(conflict.is_none());
        assert_eq!(assignment.value(1), Some(true));
        assert_eq!(assignment.value(2), Some(true));
        assert_eq!(assignment.value(3), Some(true));
        assert_eq!(trail.len(), 3);
    }

    #[test]
    fn detects_immediate_conflict() {
        let store = ClauseStore::init(vec![Clause::from("1"), Clause::from("-1")]);
        let mut assignment = Assignment::new(1);
        let mut trail = Trail::new();
        assert!(propagate(&store, &mut assignment, &mut trail).is_some());
    }

    #[test]
    fn conflict_stops_before_applying_later_units_in_same_pass() {
        // clause 0 is falsified only after 1 is forced true by clause 1; but
        // clause 2 would independently force 3 — that propagation must not
        // be observable once a conflict is detected.
        let store = ClauseStore::init(vec![
            Clause::from("-1"),
            Clause::from("1"),
            Clause::from("3"),
        ]);
        let mut assignment = Assignment::new(3);
        let mut trail = Trail::new();
        let conflict = propagate(&store, &mut assignment, &mut trail);
        assert!(conflict.is_some());
    }
}
