//! Error types for the solver library

use thiserror::Error;

/// Error raised by a solution function
#[derive(Debug, Error)]
pub enum SolveError {
    /// Input doesn't match the structure the solution expects
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Any other failure while computing an answer
    #[error("Solve failed: {0}")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Error type for running a registered solution
#[derive(Debug, Error)]
pub enum SolverError {
    /// No solution registered for the given day
    #[error("Solution for day {0} not found")]
    NotFound(u8),
    /// Day is outside 1-25
    #[error("Invalid day {0}: expected 1-25")]
    InvalidDay(u8),
    /// A solution function failed
    #[error("Day {day}{} failed: {source}", .part.map(|p| format!(" part {p}")).unwrap_or_default())]
    Solve {
        day: u8,
        /// `None` for a combined function, which produces both parts at once
        part: Option<u8>,
        #[source]
        source: SolveError,
    },
}

/// Error type for registration failures
#[derive(Debug, Clone, Error)]
pub enum RegistrationError {
    /// Day is outside 1-25
    #[error("Invalid day {0}: expected 1-25")]
    InvalidDay(u8),
    /// A solution is already registered for this day
    #[error("Duplicate solution registration for day {0}")]
    Duplicate(u8),
    /// A split solution that provides neither part
    #[error("Solution for day {0} provides no part function")]
    EmptySolution(u8),
}
