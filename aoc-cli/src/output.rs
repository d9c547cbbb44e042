//! Output formatting for solver results

use aoc_http_client::{Submission, SubmissionOutcome};
use aoc_solver::{FixtureOutcome, RunResult};
use chrono::TimeDelta;
use std::io::{self, Write};

/// Writes command results to a terminal (or any other writer)
pub struct OutputFormatter<W> {
    out: W,
}

impl OutputFormatter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> OutputFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print the answers of a run on the real input, with timing
    pub fn print_answers(&mut self, day: u8, result: &RunResult) -> io::Result<()> {
        if result.answers.is_empty() {
            return writeln!(self.out, "No output");
        }

        writeln!(
            self.out,
            "Day {} (solve: {})",
            day,
            format_duration(result.duration())
        )?;
        for part in [1, 2] {
            if let Some(answer) = result.answers.get(part) {
                writeln!(self.out, "  Part {}: {}", part, answer)?;
            }
        }
        Ok(())
    }

    /// Print one sample test: `actual == expected` or `actual != expected`
    pub fn print_fixture(&mut self, outcome: &FixtureOutcome) -> io::Result<()> {
        let actual = outcome.actual.as_deref().unwrap_or("(none)");
        if outcome.passed() {
            writeln!(
                self.out,
                "  ✓ Part {} example: {} == {}",
                outcome.part, actual, outcome.expected
            )
        } else {
            writeln!(
                self.out,
                "  ✗ Part {} example: {} != {}",
                outcome.part, actual, outcome.expected
            )
        }
    }

    pub fn print_no_examples(&mut self, day: u8) -> io::Result<()> {
        writeln!(self.out, "  No examples registered for day {}", day)
    }

    pub fn print_stars(&mut self, day: u8, stars: u8) -> io::Result<()> {
        writeln!(self.out, "You have {} stars on day {}", stars, day)
    }

    /// Print the server's verdict on a submitted answer
    pub fn print_submission(&mut self, part: u8, submission: &Submission) -> io::Result<()> {
        writeln!(
            self.out,
            "Part {}: {}",
            part,
            format_outcome(&submission.outcome)
        )?;
        if !submission.message.is_empty() {
            writeln!(self.out, "{}", submission.message)?;
        }
        Ok(())
    }

    pub fn print_cached(&mut self, year: u16, day: u8) -> io::Result<()> {
        writeln!(self.out, "{}/{:02}: cached", year, day)
    }

    /// Print free-form text as is, e.g. a Markdown description
    pub fn print_text(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }
}

/// Format a TimeDelta for display
fn format_duration(d: TimeDelta) -> String {
    let Some(micros) = d.num_microseconds() else {
        return "N/A".to_string();
    };

    if micros < 0 {
        return format!("-{}", format_duration(-d));
    }

    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    }
}

/// Format a submission outcome for display
fn format_outcome(outcome: &SubmissionOutcome) -> String {
    match outcome {
        SubmissionOutcome::Correct => "✓ Correct".to_string(),
        SubmissionOutcome::Incorrect => "✗ Incorrect".to_string(),
        SubmissionOutcome::AlreadyCompleted => "⏭ Already completed".to_string(),
        SubmissionOutcome::Throttled { wait_time } => match wait_time {
            Some(d) => format!("⏳ Throttled (wait {})", humantime::format_duration(*d)),
            None => "⏳ Throttled".to_string(),
        },
        SubmissionOutcome::Unrecognized => "? Unrecognized response".to_string(),
    }
}
