//! Day registry for looking up and running solutions

use crate::error::{RegistrationError, SolverError};
use crate::fixture::Fixtures;
use crate::instance::{RunResult, run_part, run_solution};
use crate::solution::Solution;

/// Days per year in AoC (1-25)
pub const DAYS_PER_YEAR: usize = 25;

/// Calculate storage index from day, returning None if out of bounds
#[inline]
fn calc_index(day: u8) -> Option<usize> {
    if day == 0 || day as usize > DAYS_PER_YEAR {
        return None;
    }
    Some((day - 1) as usize)
}

/// Reconstruct day from storage index
#[inline]
fn from_index(index: usize) -> u8 {
    index as u8 + 1
}

/// A registered solution and its test cases
#[derive(Debug, Clone, Copy)]
struct SolutionEntry {
    solution: Solution,
    fixtures: Fixtures,
}

/// Plugin information for automatic solution registration
///
/// Submitted with `inventory::submit!`, usually through the [`solution!`]
/// macro, and picked up by [`RegistryBuilder::register_all_plugins`].
///
/// # Example
///
/// ```
/// use aoc_solver::{Fixtures, SolutionPlugin, Solution, SolveError};
///
/// fn part1(input: &str) -> Result<String, SolveError> {
///     Ok(input.lines().count().to_string())
/// }
///
/// aoc_solver::inventory::submit! {
///     SolutionPlugin {
///         day: 3,
///         solution: Solution::part1_only(part1),
///         fixtures: Fixtures::NONE,
///     }
/// }
/// ```
pub struct SolutionPlugin {
    /// The day number (1-25)
    pub day: u8,
    pub solution: Solution,
    pub fixtures: Fixtures,
}

inventory::collect!(SolutionPlugin);

/// Register a solution for a day as a plugin
///
/// # Example
///
/// ```
/// use aoc_solver::{Answers, Fixtures, Solution, SolveError, TestCase};
///
/// fn run(input: &str) -> Result<Answers, SolveError> {
///     Ok(Answers::from(input.trim().to_uppercase()))
/// }
///
/// aoc_solver::solution!(day = 24, Solution::combined(run));
///
/// aoc_solver::solution!(
///     day = 25,
///     Solution::combined(run),
///     Fixtures { part1: &[TestCase::new("abc", "ABC")], part2: &[] }
/// );
/// ```
#[macro_export]
macro_rules! solution {
    (day = $day:expr, $solution:expr $(,)?) => {
        $crate::solution!(day = $day, $solution, $crate::Fixtures::NONE);
    };
    (day = $day:expr, $solution:expr, $fixtures:expr $(,)?) => {
        $crate::inventory::submit! {
            $crate::SolutionPlugin {
                day: $day,
                solution: $solution,
                fixtures: $fixtures,
            }
        }
    };
}

/// Builder for constructing a SolutionRegistry
///
/// Validates every registration: the day must be 1-25, registered once, and
/// the solution must expose at least one callable part.
///
/// # Example
///
/// ```
/// use aoc_solver::{Fixtures, RegistryBuilder, Solution, SolveError};
///
/// fn count(input: &str) -> Result<String, SolveError> {
///     Ok(input.len().to_string())
/// }
///
/// let registry = RegistryBuilder::new()
///     .register(1, Solution::part1_only(count), Fixtures::NONE)
///     .unwrap()
///     .build();
///
/// let result = registry.run(1, "abcd").unwrap();
/// assert_eq!(result.answers.part1.as_deref(), Some("4"));
/// assert_eq!(result.answers.part2, None);
/// ```
pub struct RegistryBuilder {
    entries: [Option<SolutionEntry>; DAYS_PER_YEAR],
}

impl RegistryBuilder {
    /// Create a new empty registry builder
    pub fn new() -> Self {
        Self {
            entries: [None; DAYS_PER_YEAR],
        }
    }

    /// Register a solution for a day
    ///
    /// # Errors
    /// * `RegistrationError::InvalidDay` - day outside 1-25
    /// * `RegistrationError::Duplicate` - day already registered
    /// * `RegistrationError::EmptySolution` - split solution without any part
    pub fn register(
        mut self,
        day: u8,
        solution: Solution,
        fixtures: Fixtures,
    ) -> Result<Self, RegistrationError> {
        let index = calc_index(day).ok_or(RegistrationError::InvalidDay(day))?;

        if !solution.is_callable() {
            return Err(RegistrationError::EmptySolution(day));
        }
        if self.entries[index].is_some() {
            return Err(RegistrationError::Duplicate(day));
        }

        tracing::debug!(day, ?solution, "registered solution");
        self.entries[index] = Some(SolutionEntry { solution, fixtures });
        Ok(self)
    }

    /// Register all collected solution plugins
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_plugins(|_| true)
    }

    /// Register solution plugins that match the given filter predicate
    pub fn register_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolutionPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolutionPlugin>() {
            if filter(plugin) {
                self = self.register(plugin.day, plugin.solution, plugin.fixtures)?;
            }
        }
        Ok(self)
    }

    /// Finalize the builder and create an immutable registry
    pub fn build(self) -> SolutionRegistry {
        SolutionRegistry {
            entries: self.entries,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable registry mapping days to solutions
pub struct SolutionRegistry {
    entries: [Option<SolutionEntry>; DAYS_PER_YEAR],
}

impl SolutionRegistry {
    fn entry(&self, day: u8) -> Result<&SolutionEntry, SolverError> {
        let index = calc_index(day).ok_or(SolverError::InvalidDay(day))?;
        self.entries[index]
            .as_ref()
            .ok_or(SolverError::NotFound(day))
    }

    /// Run the solution for a day on the given input
    ///
    /// # Errors
    /// * `SolverError::InvalidDay` - day outside 1-25
    /// * `SolverError::NotFound` - no solution registered for the day
    /// * `SolverError::Solve` - the solution function failed
    pub fn run(&self, day: u8, input: &str) -> Result<RunResult, SolverError> {
        let entry = self.entry(day)?;
        run_solution(day, &entry.solution, input)
    }

    /// Answer only one part (1 or 2) of a day
    ///
    /// A split solution calls just that part's function; a combined one runs
    /// in full and the other answer is discarded.
    pub fn run_part(&self, day: u8, part: u8, input: &str) -> Result<Option<String>, SolverError> {
        let entry = self.entry(day)?;
        run_part(day, &entry.solution, part, input)
    }

    /// Get the test cases registered for a day
    pub fn fixtures(&self, day: u8) -> Result<Fixtures, SolverError> {
        self.entry(day).map(|e| e.fixtures)
    }

    /// Get the solution registered for a day
    pub fn solution(&self, day: u8) -> Result<Solution, SolverError> {
        self.entry(day).map(|e| e.solution)
    }

    /// Check if a solution exists for a day
    pub fn contains(&self, day: u8) -> bool {
        self.entry(day).is_ok()
    }

    /// Iterate over registered days in ascending order
    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| from_index(i))
    }

    /// Get the number of registered solutions
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|e| e.is_none())
    }
}
