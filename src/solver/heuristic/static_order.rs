//! The two heuristics with no dependence on clause content: a fixed
//! variable order and a uniformly random choice.

use rand::Rng;

use crate::cnf::{Literal, VarId};
use crate::solver::assignment::Assignment;
use crate::solver::clause_store::ClauseStore;
use crate::solver::heuristic::{first_unassigned_var, Heuristic};

#[derive(Debug)]
pub struct Ordered;

impl Heuristic for Ordered {
    fn decide(&mut self, _store: &ClauseStore, assignment: &Assignment) -> Literal {
        Literal::from_var(first_unassigned_var(assignment), true)
    }
}

#[derive(Debug, Default)]
pub struct RandomChoice;

impl Heuristic for RandomChoice {
    fn decide(&mut self, _store: &ClauseStore, assignment: &Assignment) -> Literal {
        let unassigned: Vec<VarId> = assignment.unassigned_vars().collect();
        let mut rng = rand::thread_rng();
        let var = unassigned[rng.gen_range(0..unassigned.len())];
        Literal::from_var(var, rng.gen_bool(0.5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Clause;

    #[test]
    fn ordered_picks_lowest_unassigned_var() {
        let store = ClauseStore::init(vec![Clause::from("1 2 3")]);
        let mut assignment = Assignment::new(3);
        assignment.assign(Literal::new(1), 0, None).unwrap();
        let lit = Ordered.decide(&store, &assignment);
        assert_eq!(lit.var(), 2);
        assert!(lit.is_positive());
    }

    #[test]
    fn random_choice_always_picks_an_unassigned_var() {
        let store = ClauseStore::init(vec![Clause::from("1 2 3")]);
        let mut assignment = Assignment::new(3);
        assignment.assign(Literal::new(1), 0, None).unwrap();
        let mut heuristic = RandomChoice;
        for _ in 0..20 {
            let lit = heuristic.decide(&store, &assignment);
            assert!(lit.var() == 2 || lit.var() == 3);
        }
    }
}
