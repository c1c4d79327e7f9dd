//! # Cardroom CLI Library
//!
//! Command-line tools over the cardroom engine: deal and inspect a hand,
//! evaluate cards (with wild ranks), let bots play a session and show the
//! resolved configuration.
//!
//! The entry point is [`run`], which takes the arguments and both output
//! streams so tests can drive it in-process.
//!
//! ```
//! use std::io;
//! let args = vec!["cardroom", "eval", "Ah", "Kh", "Qh", "Jh", "10h"];
//! let mut out = Vec::new();
//! let code = cardroom_cli::run(args, &mut out, &mut io::stderr());
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("Royal Flush"));
//! ```
//!
//! ## Subcommands
//!
//! - `deal`: deal one hand and show every seat, the board or wild ranks, and the winners
//! - `eval`: evaluate 5 to 7 cards, optionally with wild ranks and the low
//! - `sim`: bots play N hands; optional JSONL hand records
//! - `cfg`: resolved configuration with value sources

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod ui;

use cli::{CardroomCli, Commands};
use commands::{
    TableArgs, handle_cfg_command, handle_deal_command, handle_eval_command, handle_sim_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["deal", "eval", "sim", "cfg"];

/// Parses `args` and runs the subcommand.
///
/// Returns the process exit code: `0` on success, `2` on any error, `130`
/// when a run was interrupted.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match CardroomCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return usage_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Deal {
            variant,
            players,
            seed,
        } => handle_deal_command(
            TableArgs {
                variant,
                players,
                seed,
            },
            out,
        ),
        Commands::Eval { cards, wild, low } => handle_eval_command(&cards, &wild, low, out),
        Commands::Sim {
            hands,
            variant,
            players,
            seed,
            bots,
            output,
        } => handle_sim_command(
            hands,
            TableArgs {
                variant,
                players,
                seed,
            },
            &bots,
            output,
            out,
            err,
        ),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            if !matches!(e, CliError::Interrupted(_)) && writeln!(err, "Error: {}", e).is_err() {
                return exit_code::ERROR;
            }
            e.exit_code()
        }
    }
}

fn usage_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // help and version go to stdout and succeed
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let mut report = || -> std::io::Result<()> {
        writeln!(err, "{}", e)?;
        writeln!(err)?;
        writeln!(err, "Usage: cardroom <command> [options]\n")?;
        writeln!(err, "Commands:")?;
        for c in COMMANDS {
            writeln!(err, "  {}", c)?;
        }
        writeln!(err, "\nFor full help, run: cardroom --help")
    };
    let _ = report();
    exit_code::ERROR
}
