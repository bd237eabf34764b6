//! Variable State Independent Decaying Sum, adapted from the teacher's
//! priority-queue-based implementation: every variable starts at score 1.0,
//! each conflict bumps the score of every variable in the learnt clause by
//! an exponentially growing increment, and scores are periodically rescaled
//! to avoid overflow.

use ordered_float::NotNan;
use priority_queue::PriorityQueue;

use crate::cnf::{Clause, Literal, VarId};
use crate::solver::assignment::Assignment;
use crate::solver::clause_store::ClauseStore;
use crate::solver::heuristic::Heuristic;

const BUMP_BASIS: f64 = 1.1;

#[derive(Debug)]
pub struct Vsids {
    order: PriorityQueue<VarId, NotNan<f64>>,
    priorities: Vec<NotNan<f64>>,
    conflict_index: i32,
}

fn nn(value: f64) -> NotNan<f64> {
    NotNan::new(value).expect("VSIDS priorities are never NaN")
}

impl Vsids {
    pub fn init(num_vars: usize) -> Self {
        let priorities = vec![nn(1.0); num_vars + 1];
        let order = (1..=num_vars).map(|var| (var, nn(1.0))).collect();
        Vsids {
            order,
            priorities,
            conflict_index: 0,
        }
    }

    fn rescale(&mut self, factor: f64) {
        for priority in &mut self.priorities {
            *priority = nn(priority.into_inner() / factor);
        }
        self.conflict_index -= (factor.ln() / BUMP_BASIS.ln()) as i32;
        let mut rescaled = PriorityQueue::new();
        for (var, _) in self.order.clone().into_sorted_iter() {
            rescaled.push(var, self.priorities[var]);
        }
        self.order = rescaled;
    }
}

impl Heuristic for Vsids {
    fn decide(&mut self, _store: &ClauseStore, assignment: &Assignment) -> Literal {
        loop {
            let (var, _) = self
                .order
                .pop()
                .expect("decide() is only called while an unassigned variable exists");
            if assignment.is_assigned(var) {
                continue;
            }
            return Literal::from_var(var, true);
        }
    }

    fn on_conflict(&mut self, clause: &Clause) {
        self.conflict_index += 1;
        for lit in &clause.literals {
            let var = lit.var();
            let mut increase = BUMP_BASIS.powi(self.conflict_index);
            let bumped = self.priorities[var].into_inner() + increase;
            if bumped.is_infinite() {
                self.rescale(self.priorities[var].into_inner().max(1.0));
                increase = BUMP_BASIS.powi(self.conflict_index);
            }
            let new_priority = nn(self.priorities[var].into_inner() + increase);
            self.priorities[var] = new_priority;
            self.order.push(var, new_priority);
        }
    }

    fn on_restart(&mut self) {
        let num_vars = self.priorities.len() - 1;
        self.priorities = vec![nn(1.0); num_vars + 1];
        self.order = (1..=num_vars).map(|var| (var, nn(1.0))).collect();
        self.conflict_index = 0;
    }

    fn on_unassign(&mut self, var: VarId) {
        // Replaces any existing priority, since a popped-but-still-queued
        // entry never lingers: decide() pops every candidate it inspects.
        self.order.push(var, self.priorities[var]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Clause;

    #[test]
    fn decide_skips_assigned_variables() {
        let store = ClauseStore::init(vec![Clause::from("1 2 3")]);
        let mut assignment = Assignment::new(3);
        let mut vsids = Vsids::init(3);
        let first = vsids.decide(&store, &assignment);
        assignment.assign(first, 1, None).unwrap();
        let second = vsids.decide(&store, &assignment);
        assert_ne!(first.var(), second.var());
    }

    #[test]
    fn conflicts_bump_variables_in_the_learnt_clause() {
        let store = ClauseStore::init(vec![Clause::from("1 2 3")]);
        let assignment = Assignment::new(3);
        let mut vsids = Vsids::init(3);
        vsids.on_conflict(&Clause::from("-2"));
        let lit = vsids.decide(&store, &assignment);
        assert_eq!(lit.var(), 2);
    }

    #[test]
    fn unassigning_a_variable_makes_it_choosable_again() {
        let store = ClauseStore::init(vec![Clause::from("1 2")]);
        let mut assignment = Assignment::new(2);
        let mut vsids = Vsids::init(2);

        for _ in 0..2 {
            let decision = vsids.decide(&store, &assignment);
            assignment.assign(decision, 1, None).unwrap();
        }
        // Both variables are now assigned and popped out of the queue.
        assignment.unassign(1);
        vsids.on_unassign(1);
        let decision = vsids.decide(&store, &assignment);
        assert_eq!(decision.var(), 1);
    }
}
