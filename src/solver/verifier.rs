//! Independent verifier (spec.md component 10 / §9): re-evaluates every
//! original clause against a claimed satisfying assignment. A falsified
//! clause here means the solver itself is wrong, not that the instance is
//! UNSAT — it is reported as `InternalError::VerifierRejectedSat`, not a
//! normal solve outcome.

use crate::cnf::{check_assignment, Clause, SolutionAssignment};
use crate::error::InternalError;

/// Checks `assignment` against `original_clauses`, returning the id of the
/// first falsified clause as an error.
pub fn verify(
    original_clauses: &[Clause],
    assignment: &SolutionAssignment,
) -> Result<(), InternalError> {
    if check_assignment(original_clauses, assignment) {
        return Ok(());
    }
    let clause_id = original_clauses
        .iter()
        .position(|clause| !check_assignment(std::slice::from_ref(clause), assignment))
        .expect("check_assignment returned false, so some clause must be falsified");
    Err(InternalError::VerifierRejectedSat { clause_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn accepts_a_genuine_model() {
        let clauses = vec![Clause::from("1 2"), Clause::from("-1 3")];
        let mut assignment = HashMap::new();
        assignment.insert(1, true);
        assignment.insert(2, false);
        assignment.insert(3, true);
        assert!(verify(&clauses, &assignment).is_ok());
    }

    #[test]
    fn rejects_a_falsified_clause() {
        let clauses = vec![Clause::from("1 2")];
        let mut assignment = HashMap::new();
        assignment.insert(1, false);
        assignment.insert(2, false);
        assert!(matches!(
            verify(&clauses, &assignment),
            Err(InternalError::VerifierRejectedSat { clause_id: 0 })
        ));
    }
}
