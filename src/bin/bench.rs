//! Benchmark harness (spec.md §6, "external collaborator"): walks a
//! directory tree, running the solver on every `.cnf` file found under a
//! subdirectory whose name is prefixed `uf` (expected SAT) or `uuf`
//! (expected UNSAT). Aborts a family's remaining instances as soon as one
//! instance's verdict disagrees with its family's expectation.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use prettytable::{row, Table};
use walkdir::WalkDir;

use coresat::cnf::Outcome;
use coresat::dimacs::clauses_from_file;
use coresat::solver::config::Config;
use coresat::solver::heuristic::HeuristicKind;
use coresat::solver::restarts::RestartPolicy;
use coresat::solver::{SolveResult, Solver};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to walk for `.cnf` instances.
    directory: String,

    #[arg(long, default_value = "vsids")]
    heuristic: HeuristicKind,

    #[arg(short, long, default_value = "luby")]
    restart_policy: RestartPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expectation {
    Sat,
    Unsat,
}

/// The prefix of the deepest `uf`/`uuf` ancestor directory determines a
/// file's expected verdict; files outside any such family are skipped.
fn expectation_for(path: &Path) -> Option<Expectation> {
    path.ancestors().find_map(|dir| {
        let name = dir.file_name()?.to_str()?;
        if name.starts_with("uuf") {
            Some(Expectation::Unsat)
        } else if name.starts_with("uf") {
            Some(Expectation::Sat)
        } else {
            None
        }
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter("LOGLEVEL")).init();
    let args = Args::parse();

    let mut families: std::collections::BTreeMap<String, Vec<PathBuf>> =
        std::collections::BTreeMap::new();
    for entry in WalkDir::new(&args.directory)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "cnf"))
    {
        if let Some(parent) = entry.path().parent() {
            if let Some(name) = parent.file_name().and_then(|n| n.to_str()) {
                families
                    .entry(name.to_string())
                    .or_default()
                    .push(entry.path().to_path_buf());
            }
        }
    }

    let mut table = Table::new();
    table.set_titles(row!["Family", "Instances", "Total time (s)", "Branches", "Result"]);

    let mut exit_code = 0;
    for (family, mut paths) in families {
        paths.sort();
        let mut total_time = std::time::Duration::default();
        let mut total_branches = 0usize;
        let mut solved = 0usize;
        let mut mismatched = false;

        for path in &paths {
            let Some(expectation) = expectation_for(path) else {
                continue;
            };
            let dimacs = match clauses_from_file(path.to_str().unwrap_or_default()) {
                Ok(dimacs) => dimacs,
                Err(err) => {
                    eprintln!("c skipping {}: {err}", path.display());
                    continue;
                }
            };

            let config = Config::new(args.heuristic, args.restart_policy, None);
            let mut solver = Solver::new(dimacs.clauses, dimacs.num_vars, config);

            let start = Instant::now();
            let result = solver.solve();
            total_time += start.elapsed();
            total_branches += solver.num_branching_invocations();

            match result {
                Ok(SolveResult::Outcome(outcome)) => {
                    let matches = matches!(
                        (outcome, expectation),
                        (Outcome::Sat(_), Expectation::Sat) | (Outcome::Unsat, Expectation::Unsat)
                    );
                    if !matches {
                        eprintln!(
                            "c VERDICT MISMATCH in family {family}: {} expected {:?}",
                            path.display(),
                            expectation
                        );
                        mismatched = true;
                        exit_code = 1;
                        break;
                    }
                    solved += 1;
                }
                Ok(SolveResult::BudgetExceeded) => {
                    eprintln!("c {} exceeded its conflict budget", path.display());
                }
                Err(err) => {
                    eprintln!("c internal error solving {}: {err}", path.display());
                    exit_code = 1;
                    break;
                }
            }
        }

        table.add_row(row![
            family,
            solved,
            format!("{:.3}", total_time.as_secs_f64()),
            total_branches,
            if mismatched { "MISMATCH" } else { "ok" }
        ]);
    }

    table.printstd();
    std::process::exit(exit_code);
}
