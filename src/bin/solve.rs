use clap::Parser;

use coresat::dimacs::{clauses_from_file, outcome_to_dimacs};
use coresat::error::{InternalError, ParseError};
use coresat::solver::config::Config;
use coresat::solver::heuristic::HeuristicKind;
use coresat::solver::restarts::RestartPolicy;
use coresat::solver::{SolveResult, Solver};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a DIMACS CNF file (`.gz` is decompressed transparently).
    file: String,

    #[arg(long, default_value = "vsids")]
    heuristic: HeuristicKind,

    #[arg(short, long, default_value = "luby")]
    restart_policy: RestartPolicy,

    /// Abort after this many conflicts instead of running to completion.
    #[arg(long)]
    conflict_budget: Option<usize>,
}

/// Distinguishes a malformed-input failure from a violated solver invariant,
/// so `main` can give each its own exit code.
enum Failure {
    Parse(ParseError),
    Internal(InternalError),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter("LOGLEVEL")).init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        match err {
            Failure::Parse(err) => {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
            Failure::Internal(err) => {
                eprintln!("internal error: {err}");
                std::process::exit(101);
            }
        }
    }
}

fn run(args: &Args) -> Result<(), Failure> {
    let dimacs = clauses_from_file(&args.file).map_err(Failure::Parse)?;

    let config = Config::new(args.heuristic, args.restart_policy, args.conflict_budget);
    let mut solver = Solver::new(dimacs.clauses, dimacs.num_vars, config);

    let result = solver.solve().map_err(Failure::Internal)?;

    println!("{}", solver.stats().to_table());
    println!("c branching invocations: {}", solver.num_branching_invocations());

    // SAT, UNSAT and a spent conflict budget are all normal outcomes here;
    // the process always exits 0.
    match result {
        SolveResult::Outcome(outcome) => println!("{}", outcome_to_dimacs(&outcome)),
        SolveResult::BudgetExceeded => println!("c conflict budget exceeded, no verdict reached"),
    }
    Ok(())
}
