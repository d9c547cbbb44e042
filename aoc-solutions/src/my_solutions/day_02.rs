//! Day 2: games of cubes drawn from a bag

use anyhow::{Context, anyhow, bail};
use aoc_solver::{Answers, Fixtures, Solution, SolveError, TestCase};
use std::str::FromStr;

const EXAMPLE: &str = "\
Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
";

aoc_solver::solution!(
    day = 2,
    Solution::combined(run),
    Fixtures {
        part1: &[TestCase::new(EXAMPLE, "8")],
        part2: &[TestCase::new(EXAMPLE, "2286")],
    }
);

const BAG: Cubes = Cubes {
    red: 12,
    green: 13,
    blue: 14,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Cubes {
    red: u64,
    green: u64,
    blue: u64,
}

impl Cubes {
    fn max(self, other: Cubes) -> Cubes {
        Cubes {
            red: self.red.max(other.red),
            green: self.green.max(other.green),
            blue: self.blue.max(other.blue),
        }
    }

    fn fits_in(self, bag: Cubes) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    /// `None` when the product does not fit in a `u64`
    fn power(self) -> Option<u64> {
        self.red.checked_mul(self.green)?.checked_mul(self.blue)
    }
}

/// One handful, e.g. `3 blue, 4 red`
impl FromStr for Cubes {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cubes = Cubes::default();
        for entry in s.split(',') {
            let (count, colour) = entry
                .trim()
                .split_once(' ')
                .ok_or_else(|| anyhow!("expected `<count> <colour>`, got {entry:?}"))?;
            let count = count
                .parse::<u64>()
                .with_context(|| format!("count in {entry:?}"))?;
            let total = match colour {
                "red" => &mut cubes.red,
                "green" => &mut cubes.green,
                "blue" => &mut cubes.blue,
                other => bail!("unknown colour {other:?}"),
            };
            *total = total
                .checked_add(count)
                .ok_or_else(|| anyhow!("too many {colour} cubes in {s:?}"))?;
        }
        Ok(cubes)
    }
}

/// A game id with the fewest cubes of each colour that make it possible
#[derive(Debug, PartialEq, Eq)]
struct Game {
    id: u32,
    minimum: Cubes,
}

impl FromStr for Game {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (header, handfuls) = line
            .split_once(':')
            .ok_or_else(|| anyhow!("missing `:`"))?;
        let id = header
            .strip_prefix("Game ")
            .ok_or_else(|| anyhow!("expected `Game <id>`, got {header:?}"))?
            .parse::<u32>()
            .context("game id")?;
        let minimum = handfuls
            .split(';')
            .map(Cubes::from_str)
            .try_fold(Cubes::default(), |acc, handful| handful.map(|h| acc.max(h)))?;
        Ok(Game { id, minimum })
    }
}

pub fn run(input: &str) -> Result<Answers, SolveError> {
    let games = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            line.parse::<Game>()
                .with_context(|| format!("line {}", idx + 1))
        })
        .collect::<anyhow::Result<Vec<_>>>()
        .map_err(|e| SolveError::InvalidInput(format!("{e:#}")))?;

    let possible: u64 = games
        .iter()
        .filter(|game| game.minimum.fits_in(BAG))
        .map(|game| u64::from(game.id))
        .sum();
    let power = games
        .iter()
        .try_fold(0u64, |sum, game| {
            game.minimum.power().and_then(|p| sum.checked_add(p))
        })
        .ok_or_else(|| SolveError::Failed("sum of cube set powers overflows u64".into()))?;

    Ok(Answers::both(possible.to_string(), power.to_string()))
}
