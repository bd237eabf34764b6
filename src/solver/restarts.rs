//! Restart policies (spec.md §4.7): optional, independent of correctness.
//! A restart undoes every decision back to level 0, keeping the learnt
//! clauses accumulated so far. Kept as a pluggable policy because the
//! spec requires only that restarts preserve learnt clauses, not which
//! schedule triggers them.

use clap::ValueEnum;

const FIXED_INTERVAL_SIZE: usize = 700;
const GEOMETRIC_INTERVAL_SIZE: usize = 100;
const GEOMETRIC_MAGNIFICATION_FACTOR: f64 = 1.5;
const LUBY_UNIT: usize = 32;

#[derive(Debug, Copy, Clone, ValueEnum)]
#[clap(rename_all = "kebab_case")]
pub enum RestartPolicy {
    FixedInterval,
    Geometric,
    Luby,
    NoRestarts,
}

#[derive(Debug, Clone)]
pub struct Restarter {
    num_restarts: usize,
    conflicts_since_last_restart: usize,
    policy: RestartPolicy,
}

impl Restarter {
    pub fn init(policy: RestartPolicy) -> Self {
        Restarter {
            num_restarts: 0,
            conflicts_since_last_restart: 0,
            policy,
        }
    }

    pub fn num_restarts(&self) -> usize {
        self.num_restarts
    }

    /// Records a conflict. Call once per conflict, before checking
    /// `should_restart`.
    pub fn on_conflict(&mut self) {
        self.conflicts_since_last_restart += 1;
    }

    /// Returns whether a restart should happen now, resetting the
    /// since-last-restart counter if so.
    pub fn should_restart(&mut self) -> bool {
        let due = match self.policy {
            RestartPolicy::FixedInterval => self.conflicts_since_last_restart >= FIXED_INTERVAL_SIZE,
            RestartPolicy::Geometric => {
                (self.conflicts_since_last_restart as f64)
                    >= GEOMETRIC_INTERVAL_SIZE as f64
                        * GEOMETRIC_MAGNIFICATION_FACTOR.powi(self.num_restarts as i32)
            }
            RestartPolicy::Luby => {
                self.conflicts_since_last_restart >= LUBY_UNIT * luby(self.num_restarts + 1)
            }
            RestartPolicy::NoRestarts => false,
        };
        if due {
            self.conflicts_since_last_restart = 0;
            self.num_restarts += 1;
        }
        due
    }
}

fn luby(i: usize) -> usize {
    for k in 1..usize::BITS as usize {
        if i == (1 << k) - 1 {
            return 1 << (k - 1);
        }
    }
    let mut k = 1;
    loop {
        if (1 << (k - 1)) <= i && i < (1 << k) - 1 {
            return luby(i - (1 << (k - 1)) + 1);
        }
        k += 1;
    }
}
