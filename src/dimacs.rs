//! DIMACS CNF reader and writer.
//!
//! Accepts the textual format described in spec.md §6: `c`/`%` comment
//! lines, a `p cnf <vars> <clauses>` header, and whitespace/newline
//! separated clauses terminated by a literal `0`. `.gz`-compressed input
//! is transparently decompressed.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use itertools::Itertools;
use log::debug;

use crate::cnf::{Clause, Literal, VarId};
use crate::error::ParseError;

pub struct DimacsFile {
    pub num_vars: usize,
    pub clauses: Vec<Clause>,
}

pub fn clauses_from_file(path: &str) -> Result<DimacsFile, ParseError> {
    let text = if path.ends_with(".gz") {
        let file = std::fs::File::open(path).map_err(|err| ParseError::Io(err.to_string()))?;
        let mut decoder = GzDecoder::new(file);
        let mut contents = String::new();
        decoder
            .read_to_string(&mut contents)
            .map_err(|err| ParseError::Io(err.to_string()))?;
        contents
    } else {
        std::fs::read_to_string(Path::new(path)).map_err(|err| ParseError::Io(err.to_string()))?
    };
    parse(&text)
}

pub fn parse(input: &str) -> Result<DimacsFile, ParseError> {
    let content_lines: Vec<(usize, &str)> = input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.starts_with('c') && !line.starts_with('%'))
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    let (header_line, header) = content_lines
        .first()
        .copied()
        .ok_or(ParseError::EmptyInput)?;

    let header_tokens: Vec<&str> = header.split_whitespace().collect();
    if header_tokens.len() != 4 || header_tokens[0] != "p" || header_tokens[1] != "cnf" {
        return Err(ParseError::InvalidHeader {
            line: header_line,
            header: header.to_string(),
        });
    }
    let num_vars: usize =
        header_tokens[2]
            .parse()
            .map_err(|_| ParseError::InvalidHeader {
                line: header_line,
                header: header.to_string(),
            })?;
    let num_clauses: usize =
        header_tokens[3]
            .parse()
            .map_err(|_| ParseError::InvalidHeader {
                line: header_line,
                header: header.to_string(),
            })?;

    debug!("dimacs header: {num_vars} variables, {num_clauses} clauses");

    let mut tokens: Vec<Literal> = Vec::new();
    for &(line, text) in content_lines[1..]
        .iter()
        .filter(|(_, line)| !line.starts_with('p'))
    {
        for token in text.split_whitespace() {
            let value: i64 = token.parse().map_err(|_| ParseError::MalformedLiteral {
                line,
                token: token.to_string(),
            })?;
            if value != 0 && value.unsigned_abs() as usize > num_vars {
                return Err(ParseError::VariableOutOfRange {
                    var: value,
                    max: num_vars,
                });
            }
            tokens.push(Literal::new(value as i32));
        }
    }

    if !tokens.is_empty() && tokens.last().unwrap().raw() != 0 {
        return Err(ParseError::UnterminatedClause);
    }

    let mut clauses: Vec<Clause> = Vec::new();
    let mut current: Vec<Literal> = Vec::new();
    for lit in tokens {
        if lit.raw() == 0 {
            clauses.push(Clause::new(std::mem::take(&mut current)));
        } else {
            current.push(lit);
        }
    }

    if clauses.len() != num_clauses {
        return Err(ParseError::ClauseCountMismatch {
            expected: num_clauses,
            actual: clauses.len(),
        });
    }

    let max_var_used = clauses
        .iter()
        .flat_map(|clause| clause.literals.iter())
        .map(|lit| lit.var())
        .max()
        .unwrap_or(0);
    if num_vars > 0 && max_var_used > num_vars {
        return Err(ParseError::VariableCountMismatch {
            expected: num_vars,
            actual: max_var_used,
        });
    }

    Ok(DimacsFile { clauses, num_vars })
}

/// Renders a solve outcome as DIMACS-style `s`/`v` lines.
pub fn outcome_to_dimacs(outcome: &crate::cnf::Outcome) -> String {
    match outcome {
        crate::cnf::Outcome::Unsat => "s UNSATISFIABLE".to_string(),
        crate::cnf::Outcome::Sat(assignment) => {
            let mut out = String::from("s SATISFIABLE\nv ");
            let sorted: Vec<(VarId, bool)> = assignment
                .iter()
                .sorted_by_key(|(var, _)| **var)
                .map(|(var, value)| (*var, *value))
                .collect();
            for (var, value) in sorted {
                out.push_str(&format!("{}{} ", if value { "" } else { "-" }, var));
            }
            out.push('0');
            out
        }
    }
}
