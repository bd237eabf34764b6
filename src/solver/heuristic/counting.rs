//! The literal/variable-counting heuristics: DLIS, DLCS (and their
//! randomized variants), Two-Clause, MOM and Jeroslow-Wang. Each rescans
//! the not-yet-satisfied clauses on every decision (see the module-level
//! doc comment in `heuristic::mod`).

use rand::seq::IteratorRandom;

use crate::cnf::{Literal, VarId};
use crate::solver::assignment::Assignment;
use crate::solver::clause_store::ClauseStore;
use crate::solver::heuristic::{
    combined_counts, first_unassigned_var, is_satisfied, literal_counts, unassigned_literals,
    Heuristic,
};

fn pick_max<T: Copy>(
    scored: impl Iterator<Item = (T, f64)>,
    randomized: bool,
) -> T {
    let mut best_score = f64::NEG_INFINITY;
    let mut best: Vec<T> = Vec::new();
    for (item, score) in scored {
        if score > best_score {
            best_score = score;
            best.clear();
            best.push(item);
        } else if score == best_score {
            best.push(item);
        }
    }
    if randomized && best.len() > 1 {
        *best.iter().choose(&mut rand::thread_rng()).unwrap()
    } else {
        best[0]
    }
}

#[derive(Debug)]
pub struct Dlis {
    pub randomized: bool,
}

impl Heuristic for Dlis {
    fn decide(&mut self, store: &ClauseStore, assignment: &Assignment) -> Literal {
        let counts = literal_counts(store, assignment);
        if counts.is_empty() {
            return Literal::from_var(first_unassigned_var(assignment), true);
        }
        pick_max(
            counts.iter().map(|(&lit, &count)| (lit, count as f64)),
            self.randomized,
        )
    }
}

#[derive(Debug)]
pub struct Dlcs {
    pub randomized: bool,
}

impl Heuristic for Dlcs {
    fn decide(&mut self, store: &ClauseStore, assignment: &Assignment) -> Literal {
        let counts = combined_counts(store, assignment);
        if counts.is_empty() {
            return Literal::from_var(first_unassigned_var(assignment), true);
        }
        let var: VarId = pick_max(
            counts
                .iter()
                .map(|(&var, &(pos, neg))| (var, (pos + neg) as f64)),
            self.randomized,
        );
        let (pos, neg) = counts[&var];
        Literal::from_var(var, pos >= neg)
    }
}

#[derive(Debug)]
pub struct TwoClause;

impl Heuristic for TwoClause {
    fn decide(&mut self, store: &ClauseStore, assignment: &Assignment) -> Literal {
        let mut counts = std::collections::HashMap::new();
        for (_, clause) in store.iter() {
            if is_satisfied(clause, assignment) {
                continue;
            }
            let unassigned: Vec<&Literal> = unassigned_literals(clause, assignment).collect();
            if unassigned.len() != 2 {
                continue;
            }
            for &lit in unassigned {
                *counts.entry(lit).or_insert(0usize) += 1;
            }
        }
        if counts.is_empty() {
            return Dlis { randomized: false }.decide(store, assignment);
        }
        pick_max(
            counts.iter().map(|(&lit, &count)| (lit, count as f64)),
            false,
        )
    }
}

#[derive(Debug)]
pub struct Mom;

impl Heuristic for Mom {
    fn decide(&mut self, store: &ClauseStore, assignment: &Assignment) -> Literal {
        const K: f64 = 1024.0; // spread between clause-size tiers; any large constant works.

        let min_len = store
            .iter()
            .map(|(_, clause)| (clause, is_satisfied(clause, assignment)))
            .filter(|(_, satisfied)| !satisfied)
            .map(|(clause, _)| unassigned_literals(clause, assignment).count())
            .filter(|&len| len > 0)
            .min();

        let Some(min_len) = min_len else {
            return Literal::from_var(first_unassigned_var(assignment), true);
        };

        let mut counts: std::collections::HashMap<VarId, (usize, usize)> =
            std::collections::HashMap::new();
        for (_, clause) in store.iter() {
            if is_satisfied(clause, assignment) {
                continue;
            }
            let unassigned: Vec<&Literal> = unassigned_literals(clause, assignment).collect();
            if unassigned.len() != min_len {
                continue;
            }
            for &lit in unassigned {
                let entry = counts.entry(lit.var()).or_insert((0, 0));
                if lit.is_positive() {
                    entry.0 += 1;
                } else {
                    entry.1 += 1;
                }
            }
        }

        let var: VarId = pick_max(
            counts.iter().map(|(&var, &(pos, neg))| {
                let score = (pos as f64 + neg as f64) * K + (pos as f64) * (neg as f64);
                (var, score)
            }),
            false,
        );
        let (pos, neg) = counts[&var];
        Literal::from_var(var, pos >= neg)
    }
}

#[derive(Debug)]
pub struct Jw;

impl Heuristic for Jw {
    fn decide(&mut self, store: &ClauseStore, assignment: &Assignment) -> Literal {
        let mut weights: std::collections::HashMap<Literal, f64> = std::collections::HashMap::new();
        for (_, clause) in store.iter() {
            if is_satisfied(clause, assignment) {
                continue;
            }
            let unassigned: Vec<&Literal> = unassigned_literals(clause, assignment).collect();
            if unassigned.is_empty() {
                continue;
            }
            let weight = 2f64.powi(-(unassigned.len() as i32));
            for &lit in unassigned {
                *weights.entry(lit).or_insert(0.0) += weight;
            }
        }
        if weights.is_empty() {
            return Literal::from_var(first_unassigned_var(assignment), true);
        }
        pick_max(weights.iter().map(|(&lit, &weight)| (lit, weight)), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::Clause;

    #[test]
    fn dlis_picks_most_frequent_literal() {
        let store = ClauseStore::init(vec![
            Clause::from("1 2"),
            Clause::from("1 3"),
            Clause::from("-2 3"),
        ]);
        let assignment = Assignment::new(3);
        let lit = Dlis { randomized: false }.decide(&store, &assignment);
        assert_eq!(lit, Literal::new(1));
    }

    #[test]
    fn dlcs_picks_var_with_highest_combined_count() {
        let store = ClauseStore::init(vec![
            Clause::from("1 2"),
            Clause::from("-1 2"),
            Clause::from("1 3"),
        ]);
        let assignment = Assignment::new(3);
        let lit = Dlcs { randomized: false }.decide(&store, &assignment);
        assert_eq!(lit.var(), 1);
    }

    #[test]
    fn two_clause_ignores_longer_clauses() {
        let store = ClauseStore::init(vec![Clause::from("1 2"), Clause::from("1 2 3")]);
        let assignment = Assignment::new(3);
        let lit = TwoClause.decide(&store, &assignment);
        assert!(lit.var() == 1 || lit.var() == 2);
    }

    #[test]
    fn mom_restricts_to_minimum_length_clauses() {
        let store = ClauseStore::init(vec![Clause::from("1 2 3 4"), Clause::from("1 2")]);
        let assignment = Assignment::new(4);
        let lit = Mom.decide(&store, &assignment);
        assert!(lit.var() == 1 || lit.var() == 2);
    }

    #[test]
    fn jw_prefers_literals_in_shorter_clauses() {
        let store = ClauseStore::init(vec![Clause::from("1"), Clause::from("2 3 4 5")]);
        let assignment = Assignment::new(5);
        let lit = Jw.decide(&store, &assignment);
        assert_eq!(lit, Literal::new(1));
    }
}
