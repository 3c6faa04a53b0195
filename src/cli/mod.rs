//! Command-line interface for zipcrack
//!
//! `zipcrack <ARCHIVE> <SOURCE> <MODE>` where MODE is `dictionary` (SOURCE is
//! a word list) or `bruteforce` (SOURCE is the alphabet).
//!
//! Exit codes: 0 on a match and on an exhausted word list, 1 on usage and
//! fatal errors. An unknown MODE exits 1 without printing anything.
//!
//! SOURCE may start with `-` (an alphabet such as `-_.`) as long as it is
//! not made up solely of known short flags. Options go before ARCHIVE.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing::warn;

mod output;

pub use output::Output;

use crate::config::{ConfigOverrides, CrackConfig};
use crate::oracle::ZipOracle;
use crate::search::{AttackMode, Orchestrator, SearchOutcome};

#[derive(Parser, Debug)]
#[command(
    name = "zipcrack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Recover the password of an encrypted ZIP archive",
    long_about = "Searches a word list (dictionary) or every combination of an alphabet \
                  (bruteforce) for the password of an encrypted ZIP archive, using one \
                  worker per CPU core and stopping all workers at the first match."
)]
pub struct Cli {
    /// Encrypted ZIP archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Word list file (dictionary) or alphabet letters (bruteforce)
    #[arg(value_name = "SOURCE", allow_hyphen_values = true)]
    pub source: String,

    /// Attack type: dictionary or bruteforce
    #[arg(value_name = "MODE")]
    pub mode: String,

    /// Number of worker threads (default: one per logical CPU)
    #[arg(short = 'j', long)]
    pub workers: Option<usize>,

    /// Bytes read per dictionary block (default: derived from free memory)
    #[arg(long, value_name = "BYTES")]
    pub block_size: Option<usize>,

    /// Use custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Run the attack and print the outcome.
    pub fn run(self, mode: AttackMode, started: Instant) -> Result<()> {
        let overrides = ConfigOverrides {
            workers: self.workers,
            block_size: self.block_size,
        };
        let config = CrackConfig::load(self.config.as_deref(), &overrides)
            .context("failed to load configuration")?;

        let oracle = ZipOracle::new(&self.archive);
        match oracle.inspect() {
            Ok(true) => {}
            Ok(false) => warn!("first entry is not encrypted, any candidate will match"),
            Err(err) => warn!(
                archive = %self.archive.display(),
                error = %err,
                "archive is unreadable, no candidate can match"
            ),
        }

        let orchestrator = Orchestrator::new(oracle, config, started);
        let outcome = orchestrator
            .run(mode, &self.source)
            .with_context(|| format!("{mode:?} attack failed"))?;

        let output = Output::new();
        match outcome {
            SearchOutcome::Found(result) => output.found(&result),
            // An exhausted list is silent and still exits 0
            SearchOutcome::Exhausted | SearchOutcome::Cancelled => {}
        }
        Ok(())
    }
}

/// Process entry point: parse arguments, run, and map the result to an exit code.
pub fn main() -> ExitCode {
    let started = Instant::now();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::MissingRequiredArgument => {
            print!("{}", usage());
            return ExitCode::FAILURE;
        }
        // --help and --version
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            // Keep clap's message but exit 1 like every other usage error
            let _ = err.print();
            return ExitCode::FAILURE;
        }
    };

    let Ok(mode) = cli.mode.parse::<AttackMode>() else {
        return ExitCode::FAILURE;
    };

    setup_logging(cli.verbose);

    match cli.run(mode, started) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            Output::new().error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Usage text printed when required arguments are missing
pub fn usage() -> String {
    let bin = Cli::command().get_name().to_string();
    format!(
        "\n{usage}\n\
         \nExamples:\n\
         \t- Dictionary: {bin} secret.zip passwords.txt dictionary\n\
         \t- Brute force: {bin} secret.zip abcdefghijklmnopqrstuvwxyz bruteforce\n\n",
        usage = Cli::command().render_usage(),
    )
}

fn setup_logging(verbose: u8) {
    // Logs go to stderr so stdout only ever carries the result
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
