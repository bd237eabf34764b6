//! Ordered record of assignments, with per-level boundaries (spec.md §3,
//! "Trail" / "Per-level boundaries"). The trail only orders literals; the
//! value/level/reason of each variable lives in `Assignment`. Keeping the
//! two separate means undo-to-level is a plain index operation: truncate
//! the trail, then unassign whatever fell off the end.

use crate::cnf::Literal;

#[derive(Debug, Clone)]
pub struct Trail {
    literals: Vec<Literal>,
    /// `level_starts[L]` is the trail index of the decision that opened
    /// level `L`, for `L >= 1`. `level_starts[0] == 0` is a sentinel.
    level_starts: Vec<usize>,
    pub decision_level: usize,
}

impl Trail {
    pub fn new() -> Self {
        Trail {
            literals: Vec::new(),
            level_starts: vec![0],
            decision_level: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Literal> + '_ {
        self.literals.iter().copied()
    }

    /// Pushes a decision, opening a new decision level.
    pub fn push_decision(&mut self, lit: Literal) {
        self.decision_level += 1;
        self.level_starts.push(self.literals.len());
        self.literals.push(lit);
    }

    /// Pushes a literal forced by unit propagation at the current level.
    pub fn push_propagated(&mut self, lit: Literal) {
        self.literals.push(lit);
    }

    /// All literals assigned at exactly `level`.
    pub fn level_literals(&self, level: usize) -> &[Literal] {
        let start = self.level_starts[level];
        let end = self
            .level_starts
            .get(level + 1)
            .copied()
            .unwrap_or(self.literals.len());
        &self.literals[start..end]
    }

    /// Undoes every trail entry assigned above `target_level`, returning the
    /// undone literals in most-recently-assigned-first order so the caller
    /// can unassign them from `Assignment` in the matching order.
    pub fn undo_to_level(&mut self, target_level: usize) -> Vec<Literal> {
        if target_level >= self.decision_level {
            return Vec::new();
        }
        let cut = self.level_starts[target_level + 1];
        let undone = self.literals.split_off(cut);
        self.level_starts.truncate(target_level + 1);
        self.decision_level = target_level;
        undone.into_iter().rev().collect()
    }
}

impl Default for Trail {
    fn default() -> Self {
        Trail::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(v: i32) -> Literal {
        Literal::new(v)
    }

    #[test]
    fn level_boundaries_track_decisions() {
        let mut trail = Trail::new();
        trail.push_decision(lit(1));
        trail.push_propagated(lit(2));
        trail.push_propagated(lit(3));
        trail.push_decision(lit(-4));
        trail.push_propagated(lit(5));

        assert_eq!(trail.decision_level, 2);
        assert_eq!(trail.level_literals(1), &[lit(1), lit(2), lit(3)]);
        assert_eq!(trail.level_literals(2), &[lit(-4), lit(5)]);
    }

    #[test]
    fn undo_to_level_removes_only_higher_levels() {
        let mut trail = Trail::new();
        trail.push_decision(lit(1));
        trail.push_propagated(lit(2));
        trail.push_decision(lit(3));
        trail.push_propagated(lit(4));
        trail.push_decision(lit(5));

        let undone = trail.undo_to_level(1);
        assert_eq!(undone, vec![lit(5), lit(4), lit(3)]);
        assert_eq!(trail.decision_level, 1);
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn undo_to_current_level_is_a_no_op() {
        let mut trail = Trail::new();
        trail.push_decision(lit(1));
        trail.push_propagated(lit(2));
        let undone = trail.undo_to_level(1);
        assert!(undone.is_empty());
        assert_eq!(trail.len(), 2);
    }
}
