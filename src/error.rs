use thiserror::Error;

/// Errors surfaced while reading a DIMACS CNF file, before `solve()` begins.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: expected 'p cnf <vars> <clauses>', got '{header}'")]
    InvalidHeader { line: usize, header: String },
    #[error("line {line}: '{token}' is not a valid literal")]
    MalformedLiteral { line: usize, token: String },
    #[error("variable {var} is outside the declared range 1..={max}")]
    VariableOutOfRange { var: i64, max: usize },
    #[error("last clause is not terminated by a trailing 0")]
    UnterminatedClause,
    #[error("header declared {expected} clauses, found {actual}")]
    ClauseCountMismatch { expected: usize, actual: usize },
    #[error("header declared {expected} variables, found {actual} in use")]
    VariableCountMismatch { expected: usize, actual: usize },
    #[error("input contains no DIMACS header")]
    EmptyInput,
    #[error("could not read input: {0}")]
    Io(String),
}

/// A violated solver invariant. These are always fatal: the caller should
/// abort rather than treat them as a normal UNSAT result.
#[derive(Debug, Error)]
pub enum InternalError {
    #[error("attempted to assign variable {var} which is already assigned")]
    DoubleAssignment { var: usize },
    #[error("verifier rejected a claimed satisfying assignment: clause {clause_id} is falsified")]
    VerifierRejectedSat { clause_id: usize },
    #[error("conflict analysis failed to reduce the working clause to a single First-UIP")]
    AnalyzerFailedToReduce,
}
