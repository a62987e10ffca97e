//! # Majiang CLI Library
//!
//! This library provides the command-line interface for the Majiang Mahjong
//! rules engine. It exposes subcommands for dealing, simulating, inspecting
//! and replaying hands.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["majiang", "sim", "--hands", "10", "--seed", "7"];
//! let code = majiang_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `deal`: Deal a single hand for inspection
//! - `sim`: Let bots play hands and write JSONL hand records
//! - `replay`: Re-run recorded hands and check their outcomes
//! - `snapshot`: Print a full snapshot or a seat's redacted view
//! - `cfg`: Display current configuration settings
//! - `rng`: Inspect the deal RNG for a seed

use clap::Parser;
use std::io::Write;
pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;

use cli::{Commands, MajiangCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_replay_command, handle_rng_command,
    handle_sim_command, handle_snapshot_command,
};

pub use error::{BatchValidationError, CliError};

const COMMANDS: &[&str] = &["deal", "sim", "replay", "snapshot", "cfg", "rng"];

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
///
/// # Arguments
///
/// * `args` - Iterator over command-line arguments (typically `std::env::args()`)
/// * `out` - Output stream for normal output (typically `stdout`)
/// * `err` - Output stream for error messages (typically `stderr`)
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["majiang", "deal", "--seed", "42"];
/// let code = majiang_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match MajiangCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Deal {
            seed,
            seats,
            unicode,
        } => handle_deal_command(seed, seats, unicode, out),
        Commands::Sim {
            hands,
            output,
            seed,
            ai,
        } => handle_sim_command(hands, output, seed, ai, out, err),
        Commands::Replay { input, verbose } => handle_replay_command(input, verbose, out, err),
        Commands::Snapshot {
            seed,
            resume,
            steps,
            view,
            output,
        } => handle_snapshot_command(seed, resume, steps, view, output, out, err),
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Rng { seed } => handle_rng_command(seed, out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            if writeln!(err, "Error: {}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            if write!(out, "{}", e).is_err() {
                return exit_code::ERROR;
            }
            exit_code::SUCCESS
        }
        _ => {
            if writeln!(err, "{}", e).is_err()
                || writeln!(err).is_err()
                || writeln!(err, "Majiang CLI").is_err()
                || writeln!(err, "Usage: majiang <command> [options]\n").is_err()
                || writeln!(err, "Commands:").is_err()
            {
                return exit_code::ERROR;
            }
            for c in COMMANDS {
                if writeln!(err, "  {}", c).is_err() {
                    return exit_code::ERROR;
                }
            }
            if writeln!(err, "\nFor full help, run: majiang --help").is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}
