//! Executing a solution against an input

use crate::error::SolverError;
use crate::solution::{Answers, PartFn, Solution};
use chrono::{DateTime, TimeDelta, Utc};

/// Answers from one run, including timing information
#[derive(Debug, Clone)]
pub struct RunResult {
    pub answers: Answers,
    /// When solving started (UTC)
    pub started: DateTime<Utc>,
    /// When solving completed (UTC)
    pub finished: DateTime<Utc>,
}

impl RunResult {
    /// Get the solve duration as TimeDelta
    pub fn duration(&self) -> TimeDelta {
        self.finished - self.started
    }
}

/// Run a solution for `day` on `input`
///
/// A combined function's answers are returned as they are. For a split
/// solution each present part function is evaluated in order and a missing
/// one leaves its answer empty.
pub(crate) fn run_solution(
    day: u8,
    solution: &Solution,
    input: &str,
) -> Result<RunResult, SolverError> {
    let started = Utc::now();

    let answers = match solution {
        Solution::Combined(run) => run(input).map_err(|source| SolverError::Solve {
            day,
            part: None,
            source,
        })?,
        Solution::Split { part1, part2 } => {
            let solve = |part: u8, f: &Option<PartFn>| {
                f.map(|f| f(input))
                    .transpose()
                    .map_err(|source| SolverError::Solve {
                        day,
                        part: Some(part),
                        source,
                    })
            };
            Answers {
                part1: solve(1, part1)?,
                part2: solve(2, part2)?,
            }
        }
    };

    Ok(RunResult {
        answers,
        started,
        finished: Utc::now(),
    })
}

/// Answer a single part of `day` on `input`
///
/// Only the requested part function of a split solution is called, so a
/// sample input written for one part never reaches the other.
pub(crate) fn run_part(
    day: u8,
    solution: &Solution,
    part: u8,
    input: &str,
) -> Result<Option<String>, SolverError> {
    match solution {
        Solution::Combined(_) => run_solution(day, solution, input)
            .map(|result| result.answers.get(part).map(str::to_string)),
        Solution::Split { part1, part2 } => {
            let f = match part {
                1 => part1,
                2 => part2,
                _ => &None,
            };
            f.map(|f| f(input))
                .transpose()
                .map_err(|source| SolverError::Solve {
                    day,
                    part: Some(part),
                    source,
                })
        }
    }
}
