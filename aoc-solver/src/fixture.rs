//! Sample inputs and expected answers from the puzzle description

use crate::error::SolverError;
use crate::registry::SolutionRegistry;

/// One sample input together with the answer the puzzle text gives for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestCase {
    pub input: &'static str,
    pub expected: &'static str,
}

impl TestCase {
    pub const fn new(input: &'static str, expected: &'static str) -> Self {
        Self { input, expected }
    }
}

/// Test cases for both parts of a day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixtures {
    pub part1: &'static [TestCase],
    pub part2: &'static [TestCase],
}

impl Fixtures {
    /// No test cases for either part
    pub const NONE: Fixtures = Fixtures {
        part1: &[],
        part2: &[],
    };

    /// Test cases for a part (1 or 2)
    pub fn for_part(&self, part: u8) -> &'static [TestCase] {
        match part {
            1 => self.part1,
            2 => self.part2,
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.part1.is_empty() && self.part2.is_empty()
    }
}

impl Default for Fixtures {
    fn default() -> Self {
        Self::NONE
    }
}

/// Result of running one test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureOutcome {
    pub part: u8,
    pub expected: &'static str,
    /// `None` when the solution produced nothing for this part
    pub actual: Option<String>,
}

impl FixtureOutcome {
    pub fn passed(&self) -> bool {
        self.actual.as_deref() == Some(self.expected)
    }
}

/// Run every test case of one part against the registered solution
///
/// Stops at the first solution error; a wrong answer is a failed outcome, not
/// an error.
pub fn check_part(
    registry: &SolutionRegistry,
    day: u8,
    part: u8,
) -> Result<Vec<FixtureOutcome>, SolverError> {
    registry
        .fixtures(day)?
        .for_part(part)
        .iter()
        .map(|case| {
            Ok(FixtureOutcome {
                part,
                expected: case.expected,
                actual: registry.run_part(day, part, case.input)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_passes_only_on_exact_match() {
        let outcome = FixtureOutcome {
            part: 1,
            expected: "142",
            actual: Some("142".to_string()),
        };
        assert!(outcome.passed());

        let outcome = FixtureOutcome {
            actual: Some("142\n".to_string()),
            ..outcome
        };
        assert!(!outcome.passed());

        let outcome = FixtureOutcome {
            actual: None,
            ..outcome
        };
        assert!(!outcome.passed());
    }

    #[test]
    fn test_for_part() {
        const CASES: &[TestCase] = &[TestCase::new("a", "1")];
        let fixtures = Fixtures {
            part1: CASES,
            part2: &[],
        };
        assert_eq!(fixtures.for_part(1).len(), 1);
        assert!(fixtures.for_part(2).is_empty());
        assert!(fixtures.for_part(0).is_empty());
        assert!(!fixtures.is_empty());
        assert!(Fixtures::NONE.is_empty());
    }
}
