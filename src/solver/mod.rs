//! The search loop (spec.md §4.8): composes the clause store, assignment,
//! trail, propagator, analyzer and heuristic into a complete CDCL solve.

pub mod analyzer;
pub mod assignment;
pub mod clause_store;
pub mod config;
pub mod heuristic;
pub mod propagator;
pub mod restarts;
pub mod statistics;
pub mod trail;
pub mod verifier;

use std::collections::HashSet;

use log::{debug, info};

use crate::cnf::{Clause, Literal, Outcome, SolutionAssignment, VarId};
use crate::error::InternalError;
use analyzer::Analysis;
use assignment::Assignment;
use clause_store::ClauseStore;
use config::Config;
use restarts::Restarter;
use statistics::Statistics;
use trail::Trail;

/// The outcome of a bounded solve: either a definite verdict, or an early
/// stop because the caller-supplied conflict budget was exhausted
/// (spec.md §5's "optional caller-supplied timeout checked between
/// conflicts").
#[derive(Debug)]
pub enum SolveResult {
    Outcome(Outcome),
    BudgetExceeded,
}

pub struct Solver {
    config: Config,
    store: ClauseStore,
    num_vars: usize,
    stats: Statistics,
    num_branching_invocations: usize,
}

impl Solver {
    pub fn new(clauses: Vec<Clause>, num_vars: usize, config: Config) -> Self {
        let stats = Statistics::new(clauses.len(), num_vars);
        Solver {
            store: ClauseStore::init(clauses),
            num_vars,
            config,
            stats,
            num_branching_invocations: 0,
        }
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn num_branching_invocations(&self) -> usize {
        self.num_branching_invocations
    }

    pub fn solve(&mut self) -> Result<SolveResult, InternalError> {
        self.stats.start_timing();

        if self.is_trivially_unsat() {
            info!("trivially unsat: empty or contradictory unit clauses present");
            self.stats.stop_timing();
            return Ok(SolveResult::Outcome(Outcome::Unsat));
        }

        let mut assignment = Assignment::new(self.num_vars);
        let mut trail = Trail::new();
        let mut heuristic = self.config.heuristic.create(self.num_vars);
        let mut restarter = Restarter::init(self.config.restart_policy);

        let result = loop {
            if assignment.is_complete() {
                break SolveResult::Outcome(Outcome::Sat(self.extract_solution(&assignment)?));
            }

            let trail_len_before = trail.len();
            let conflict = propagator::propagate(&self.store, &mut assignment, &mut trail);
            self.stats.num_propagations += trail.len() - trail_len_before;

            if let Some(conflict_id) = conflict {
                self.stats.num_conflicts += 1;

                if let Some(budget) = self.config.conflict_budget {
                    if self.stats.num_conflicts > budget {
                        break SolveResult::BudgetExceeded;
                    }
                }

                match analyzer::analyze(conflict_id, &self.store, &assignment, &trail) {
                    Analysis::Unsat => break SolveResult::Outcome(Outcome::Unsat),
                    Analysis::Learnt {
                        clause,
                        backjump_level,
                    } => {
                        debug!(
                            "learnt clause of size {} at level {}, backjumping to {}",
                            clause.len(),
                            trail.decision_level,
                            backjump_level
                        );
                        heuristic.on_conflict(&clause);
                        self.stats.num_learnt_clauses += 1;
                        restarter.on_conflict();

                        for lit in trail.undo_to_level(backjump_level) {
                            assignment.unassign(lit.var());
                            heuristic.on_unassign(lit.var());
                        }
                        // The learnt clause is unit immediately; the next
                        // propagate() pass picks it up rather than special-
                        // casing the assertion here.
                        self.store.add_learnt(clause);
                    }
                }
            } else if assignment.is_complete() {
                break SolveResult::Outcome(Outcome::Sat(self.extract_solution(&assignment)?));
            } else if restarter.should_restart() {
                self.stats.num_restarts += 1;
                for lit in trail.undo_to_level(0) {
                    assignment.unassign(lit.var());
                    heuristic.on_unassign(lit.var());
                }
                heuristic.on_restart();
            } else {
                let decision = heuristic.decide(&self.store, &assignment);
                self.num_branching_invocations += 1;
                self.stats.num_decisions += 1;
                trail.push_decision(decision);
                assignment.assign(decision, trail.decision_level, None)?;
            }
        };

        self.stats.stop_timing();
        Ok(result)
    }

    fn is_trivially_unsat(&self) -> bool {
        if self
            .store
            .original_clauses()
            .iter()
            .any(|clause| clause.is_empty())
        {
            return true;
        }

        let units: Vec<Literal> = self
            .store
            .original_clauses()
            .iter()
            .filter(|clause| clause.len() == 1)
            .map(|clause| clause.literals[0])
            .collect();
        let positives: HashSet<VarId> = units
            .iter()
            .filter(|lit| lit.is_positive())
            .map(|lit| lit.var())
            .collect();
        let negatives: HashSet<VarId> = units
            .iter()
            .filter(|lit| !lit.is_positive())
            .map(|lit| lit.var())
            .collect();
        !positives.is_disjoint(&negatives)
    }

    fn extract_solution(&self, assignment: &Assignment) -> Result<SolutionAssignment, InternalError> {
        let solution: SolutionAssignment = (1..=self.num_vars)
            .map(|var| (var, assignment.value(var).unwrap_or(true)))
            .collect();
        verifier::verify(self.store.original_clauses(), &solution)?;
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Clause;
    use heuristic::HeuristicKind;
    use restarts::RestartPolicy;

    fn solve_with(clauses: Vec<Clause>, num_vars: usize, heuristic: HeuristicKind) -> Outcome {
        let config = Config::new(heuristic, RestartPolicy::Luby, None);
        let mut solver = Solver::new(clauses, num_vars, config);
        match solver.solve().unwrap() {
            SolveResult::Outcome(outcome) => outcome,
            SolveResult::BudgetExceeded => panic!("unbounded solve exceeded its budget"),
        }
    }

    #[test]
    fn empty_clause_set_is_sat_with_empty_assignment() {
        let outcome = solve_with(vec![], 0, HeuristicKind::Ordered);
        assert!(matches!(outcome, Outcome::Sat(ref a) if a.is_empty()));
    }

    #[test]
    fn single_positive_unit_clause_forces_true() {
        let outcome = solve_with(vec![Clause::from("1")], 1, HeuristicKind::Ordered);
        match outcome {
            Outcome::Sat(assignment) => assert_eq!(assignment[&1], true),
            Outcome::Unsat => panic!("expected SAT"),
        }
    }

    #[test]
    fn contradictory_units_are_unsat() {
        let outcome = solve_with(
            vec![Clause::from("1"), Clause::from("-1")],
            1,
            HeuristicKind::Ordered,
        );
        assert_eq!(outcome, Outcome::Unsat);
    }

    #[test]
    fn four_clause_two_variable_instance_is_unsat() {
        let clauses = vec![
            Clause::from("1 2"),
            Clause::from("-1 2"),
            Clause::from("1 -2"),
            Clause::from("-1 -2"),
        ];
        let outcome = solve_with(clauses, 2, HeuristicKind::Ordered);
        assert_eq!(outcome, Outcome::Unsat);
    }

    #[test]
    fn exactly_one_of_three_instance_is_sat() {
        let clauses = vec![
            Clause::from("1 2 3"),
            Clause::from("-1 -2"),
            Clause::from("-1 -3"),
            Clause::from("-2 -3"),
        ];
        let outcome = solve_with(clauses, 3, HeuristicKind::Ordered);
        match outcome {
            Outcome::Sat(assignment) => {
                let true_count = [1, 2, 3]
                    .iter()
                    .filter(|&&v| assignment[&v])
                    .count();
                assert_eq!(true_count, 1);
            }
            Outcome::Unsat => panic!("expected SAT"),
        }
    }

    #[test]
    fn verdict_is_independent_of_heuristic_choice() {
        let clauses = vec![
            Clause::from("1 2 3"),
            Clause::from("-1 -2"),
            Clause::from("-1 -3"),
            Clause::from("-2 -3"),
        ];
        for kind in [
            HeuristicKind::Ordered,
            HeuristicKind::Random,
            HeuristicKind::Dlis,
            HeuristicKind::Rdlis,
            HeuristicKind::Dlcs,
            HeuristicKind::Rdlcs,
            HeuristicKind::TwoClause,
            HeuristicKind::Mom,
            HeuristicKind::Jw,
            HeuristicKind::Vsids,
        ] {
            let outcome = solve_with(clauses.clone(), 3, kind);
            assert!(outcome.is_sat());
        }
    }

    #[test]
    fn verdict_is_independent_of_restarts() {
        let clauses = vec![
            Clause::from("1 2"),
            Clause::from("-1 2"),
            Clause::from("1 -2"),
            Clause::from("-1 -2"),
        ];
        for policy in [
            RestartPolicy::NoRestarts,
            RestartPolicy::FixedInterval,
            RestartPolicy::Geometric,
            RestartPolicy::Luby,
        ] {
            let config = Config::new(HeuristicKind::Vsids, policy, None);
            let mut solver = Solver::new(clauses.clone(), 2, config);
            match solver.solve().unwrap() {
                SolveResult::Outcome(outcome) => assert_eq!(outcome, Outcome::Unsat),
                SolveResult::BudgetExceeded => panic!("should not hit a budget"),
            }
        }
    }

    #[test]
    fn backjump_to_the_current_level_is_a_no_op() {
        let mut trail = Trail::new();
        trail.push_decision(Literal::new(1));
        trail.push_propagated(Literal::new(2));
        let undone = trail.undo_to_level(trail.decision_level);
        assert!(undone.is_empty());
    }

    #[test]
    fn conflict_budget_stops_the_search_early() {
        let clauses = vec![
            Clause::from("1 2"),
            Clause::from("-1 2"),
            Clause::from("1 -2"),
            Clause::from("-1 -2"),
        ];
        let config = Config::new(HeuristicKind::Ordered, RestartPolicy::NoRestarts, Some(0));
        let mut solver = Solver::new(clauses, 2, config);
        match solver.solve().unwrap() {
            SolveResult::BudgetExceeded => {}
            SolveResult::Outcome(_) => panic!("expected the conflict budget to trigger"),
        }
    }
}
