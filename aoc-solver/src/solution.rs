//! Solution shapes and the answers they produce

use crate::error::SolveError;

/// Signature of a function solving a single part
pub type PartFn = fn(&str) -> Result<String, SolveError>;

/// Signature of a function solving both parts in one pass
pub type CombinedFn = fn(&str) -> Result<Answers, SolveError>;

/// Answers produced for one day; either part may be absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub part1: Option<String>,
    pub part2: Option<String>,
}

impl Answers {
    /// Both parts answered
    pub fn both(part1: impl Into<String>, part2: impl Into<String>) -> Self {
        Self {
            part1: Some(part1.into()),
            part2: Some(part2.into()),
        }
    }

    /// Only part 1 answered
    pub fn part1_only(part1: impl Into<String>) -> Self {
        Self {
            part1: Some(part1.into()),
            part2: None,
        }
    }

    /// Nothing answered yet
    pub fn none() -> Self {
        Self::default()
    }

    /// Get the answer for a part (1 or 2)
    pub fn get(&self, part: u8) -> Option<&str> {
        match part {
            1 => self.part1.as_deref(),
            2 => self.part2.as_deref(),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.part1.is_none() && self.part2.is_none()
    }
}

/// A plain string from a combined function is the part 1 answer
impl From<String> for Answers {
    fn from(part1: String) -> Self {
        Self::part1_only(part1)
    }
}

impl From<&str> for Answers {
    fn from(part1: &str) -> Self {
        Self::part1_only(part1)
    }
}

impl<A: ToString, B: ToString> From<(A, B)> for Answers {
    fn from((part1, part2): (A, B)) -> Self {
        Self::both(part1.to_string(), part2.to_string())
    }
}

/// How a day's solution is exposed
///
/// A day is either solved by one function producing both answers, or by
/// separate functions per part. A split solution may leave one part out
/// (typically part 2 while it's still being written), but not both; the
/// registry rejects that at registration.
#[derive(Clone, Copy)]
pub enum Solution {
    Combined(CombinedFn),
    Split {
        part1: Option<PartFn>,
        part2: Option<PartFn>,
    },
}

impl Solution {
    pub const fn combined(run: CombinedFn) -> Self {
        Self::Combined(run)
    }

    pub const fn split(part1: PartFn, part2: PartFn) -> Self {
        Self::Split {
            part1: Some(part1),
            part2: Some(part2),
        }
    }

    pub const fn part1_only(part1: PartFn) -> Self {
        Self::Split {
            part1: Some(part1),
            part2: None,
        }
    }

    pub const fn part2_only(part2: PartFn) -> Self {
        Self::Split {
            part1: None,
            part2: Some(part2),
        }
    }

    /// Parts this solution can produce, as `[part1, part2]`
    ///
    /// A combined function may produce either part, so both are reported.
    pub fn parts(&self) -> [bool; 2] {
        match self {
            Self::Combined(_) => [true, true],
            Self::Split { part1, part2 } => [part1.is_some(), part2.is_some()],
        }
    }

    /// Whether the solution can produce anything at all
    pub fn is_callable(&self) -> bool {
        self.parts().iter().any(|&p| p)
    }
}

impl std::fmt::Debug for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Combined(_) => f.write_str("Combined"),
            Self::Split { part1, part2 } => f
                .debug_struct("Split")
                .field("part1", &part1.is_some())
                .field("part2", &part2.is_some())
                .finish(),
        }
    }
}
