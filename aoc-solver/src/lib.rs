//! Advent of Code Solution Registry
//!
//! Maps each day of a puzzle year to the code that solves it, together with
//! the sample inputs from the puzzle text.
//!
//! # Overview
//!
//! A day is solved either by one function producing both answers
//! ([`Solution::Combined`]) or by a function per part ([`Solution::Split`]).
//! Solutions register themselves with the [`solution!`] macro and are
//! collected into a [`SolutionRegistry`] at startup.
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{Fixtures, RegistryBuilder, Solution, SolveError, TestCase};
//!
//! fn part1(input: &str) -> Result<String, SolveError> {
//!     let sum: i64 = input
//!         .lines()
//!         .map(|l| l.parse::<i64>().map_err(|e| SolveError::InvalidInput(e.to_string())))
//!         .sum::<Result<_, _>>()?;
//!     Ok(sum.to_string())
//! }
//!
//! fn part2(input: &str) -> Result<String, SolveError> {
//!     Ok(input.lines().count().to_string())
//! }
//!
//! const FIXTURES: Fixtures = Fixtures {
//!     part1: &[TestCase::new("1\n2\n3", "6")],
//!     part2: &[TestCase::new("1\n2\n3", "3")],
//! };
//!
//! let registry = RegistryBuilder::new()
//!     .register(1, Solution::split(part1, part2), FIXTURES)
//!     .unwrap()
//!     .build();
//!
//! let result = registry.run(1, "10\n20").unwrap();
//! assert_eq!(result.answers.part1.as_deref(), Some("30"));
//! assert_eq!(result.answers.part2.as_deref(), Some("2"));
//!
//! let outcomes = aoc_solver::check_part(&registry, 1, 1).unwrap();
//! assert!(outcomes.iter().all(|o| o.passed()));
//! ```

mod error;
mod fixture;
mod instance;
mod registry;
mod solution;

// Re-export public API
pub use error::{RegistrationError, SolveError, SolverError};
pub use fixture::{FixtureOutcome, Fixtures, TestCase, check_part};
pub use instance::RunResult;
pub use registry::{DAYS_PER_YEAR, RegistryBuilder, SolutionPlugin, SolutionRegistry};
pub use solution::{Answers, CombinedFn, PartFn, Solution};

// Re-export inventory for use by the `solution!` macro
pub use inventory;
