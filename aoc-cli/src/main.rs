//! AOC CLI - fetch puzzle inputs, run solutions against them and submit answers

mod cache;
mod cli;
mod config;
mod error;
mod executor;
mod output;

// Import aoc-solutions to link the solution plugins
use aoc_solutions as _;

use aoc_http_client::AocClient;
use aoc_solver::RegistryBuilder;
use cache::InputCache;
use clap::Parser;
use cli::Args;
use config::Config;
use executor::{Executor, StdinConfirm};
use output::OutputFormatter;
use tracing::level_filters::LevelFilter;

fn main() {
    let args = Args::parse();
    enable_tracing(args.verbose);

    let command = args.resolve_command().unwrap_or_else(|e| e.exit());

    if let Err(e) = run(&args, command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; warnings by default, more with each `-v`
fn enable_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn run(args: &Args, command: cli::Command) -> Result<(), error::CliError> {
    let config = Config::from_args(args)?;
    let registry = RegistryBuilder::new().register_all_plugins()?.build();
    if registry.is_empty() {
        tracing::warn!("no solutions are registered");
    } else {
        tracing::debug!(
            year = config.year,
            count = registry.len(),
            days = ?registry.days().collect::<Vec<_>>(),
            "loaded solutions"
        );
    }

    let client = AocClient::new(config.client_config())?;
    let mut executor = Executor::new(
        registry,
        client,
        InputCache::new(&config.inputs_dir),
        OutputFormatter::stdout(),
    );
    executor.execute(command, &mut StdinConfirm)
}
