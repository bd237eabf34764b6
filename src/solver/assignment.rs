//! Per-variable truth value, decision level and reason clause.
//!
//! This is "Assignment state" from spec.md §2/§4.2: a flat array of
//! {TRUE, FALSE, UNDEFINED} plus, for every assigned variable, the level
//! it was assigned at and the clause that forced it (`None` for a
//! decision). The implication graph (spec.md §4) is never materialized;
//! the conflict analyzer reconstructs it on demand by walking `reason_of`.

use crate::cnf::{ClauseId, Literal, VarId};
use crate::error::InternalError;

#[derive(Debug, Clone)]
pub struct Assignment {
    values: Vec<Option<bool>>,
    levels: Vec<usize>,
    reasons: Vec<Option<ClauseId>>,
}

impl Assignment {
    pub fn new(num_vars: usize) -> Self {
        Assignment {
            values: vec![None; num_vars + 1],
            levels: vec![0; num_vars + 1],
            reasons: vec![None; num_vars + 1],
        }
    }

    pub fn num_vars(&self) -> usize {
        self.values.len() - 1
    }

    pub fn value(&self, var: VarId) -> Option<bool> {
        self.values[var]
    }

    /// The value of a literal, honoring its sign. `None` if unassigned.
    pub fn literal_value(&self, lit: Literal) -> Option<bool> {
        self.values[lit.var()].map(|value| value == lit.is_positive())
    }

    pub fn level_of(&self, var: VarId) -> usize {
        self.levels[var]
    }

    pub fn reason_of(&self, var: VarId) -> Option<ClauseId> {
        self.reasons[var]
    }

    pub fn is_assigned(&self, var: VarId) -> bool {
        self.values[var].is_some()
    }

    pub fn num_assigned(&self) -> usize {
        self.values.iter().skip(1).filter(|v| v.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().skip(1).all(|v| v.is_some())
    }

    pub fn unassigned_vars(&self) -> impl Iterator<Item = VarId> + '_ {
        (1..self.values.len()).filter(move |&v| self.values[v].is_none())
    }

    /// Assigns `lit` at `level`, with `reason` being the forcing clause
    /// (`None` for a decision). Fails if the variable is already assigned.
    pub fn assign(
        &mut self,
        lit: Literal,
        level: usize,
        reason: Option<ClauseId>,
    ) -> Result<(), InternalError> {
        let var = lit.var();
        if self.values[var].is_some() {
            return Err(InternalError::DoubleAssignment { var });
        }
        self.values[var] = Some(lit.is_positive());
        self.levels[var] = level;
        self.reasons[var] = reason;
        Ok(())
    }

    /// Resets a variable back to UNDEFINED, clearing its level and reason.
    pub fn unassign(&mut self, var: VarId) {
        self.values[var] = None;
        self.levels[var] = 0;
        self.reasons[var] = None;
    }
}
