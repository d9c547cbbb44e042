//! Day 1: calibration values hidden in lines of text

use anyhow::{Context, anyhow};
use aoc_solver::{Fixtures, Solution, SolveError, TestCase};

const SPELLED: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

aoc_solver::solution!(
    day = 1,
    Solution::split(part1, part2),
    Fixtures {
        part1: &[TestCase::new(
            "1abc2\npqr3stu8vwx\na1b2c3d4e5f\ntreb7uchet\n",
            "142",
        )],
        part2: &[TestCase::new(
            "two1nine\neightwothree\nabcone2threexyz\nxtwone3four\n4nineeightseven2\nzoneight234\n7pqrstsixteen\n",
            "281",
        )],
    }
);

pub fn part1(input: &str) -> Result<String, SolveError> {
    calibration_sum(input, false)
}

pub fn part2(input: &str) -> Result<String, SolveError> {
    calibration_sum(input, true)
}

fn calibration_sum(input: &str, spelled: bool) -> Result<String, SolveError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            calibration_value(line, spelled).with_context(|| format!("line {}", idx + 1))
        })
        .sum::<anyhow::Result<u32>>()
        .map(|sum| sum.to_string())
        .map_err(|e| SolveError::InvalidInput(format!("{e:#}")))
}

/// First and last digit of the line read as a two-digit number
fn calibration_value(line: &str, spelled: bool) -> anyhow::Result<u32> {
    let first = line
        .char_indices()
        .find_map(|(i, _)| digit_at(&line[i..], spelled));
    let last = line
        .char_indices()
        .rev()
        .find_map(|(i, _)| digit_at(&line[i..], spelled));

    match (first, last) {
        (Some(first), Some(last)) => Ok(first * 10 + last),
        _ => Err(anyhow!("no digit in {line:?}")),
    }
}

/// Digit starting at the beginning of `rest`, if any
///
/// Spelled digits may overlap ("eightwo" holds both 8 and 2), so each
/// position is checked on its own.
fn digit_at(rest: &str, spelled: bool) -> Option<u32> {
    let c = rest.chars().next()?;
    if let Some(digit) = c.to_digit(10) {
        return Some(digit);
    }
    if !spelled {
        return None;
    }
    SPELLED
        .iter()
        .position(|word| rest.starts_with(word))
        .map(|digit| digit as u32)
}
