//! CLI argument parsing using clap

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Whether answers that pass their sample tests get submitted
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum SubmitMode {
    /// Ask on the terminal before each submission (default)
    #[default]
    Ask,
    /// Submit without asking
    Always,
    /// Never submit
    Never,
}

/// Advent of Code helper: fetch inputs, run solutions, submit answers
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run and submit Advent of Code solutions", version)]
pub struct Args {
    /// Puzzle year (overrides the YEAR environment variable)
    #[arg(short, long, global = true)]
    pub year: Option<u16>,

    /// Directory holding cached puzzle inputs
    #[arg(long, global = true, default_value = "inputs")]
    pub inputs_dir: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Day to run when no subcommand is given
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
    pub day: Option<u8>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Solve a day, check it against the puzzle's examples and offer to submit
    Run {
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
        day: u8,

        /// Submission behaviour for answers whose examples pass
        #[arg(long, value_enum, default_value_t = SubmitMode::Ask)]
        submit: SubmitMode,
    },
    /// Download every released input that is not cached yet
    Cache,
    /// Print a day's puzzle description as Markdown
    Markdown {
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
        day: u8,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show how many stars a day has earned
    Status {
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
        day: u8,
    },
}

impl Args {
    /// The command to execute; a bare `aoc --day N` means `run`
    pub fn resolve_command(&self) -> Result<Command, clap::Error> {
        match (&self.command, self.day) {
            (Some(command), _) => Ok(command.clone()),
            (None, Some(day)) => Ok(Command::Run {
                day,
                submit: SubmitMode::default(),
            }),
            (None, None) => Err(Self::command().error(
                ErrorKind::MissingRequiredArgument,
                "a day is required: use `aoc --day <N>` or a subcommand",
            )),
        }
    }
}
