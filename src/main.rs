//! splitmerge - Android split APK merger
//!
//! Lists the modules of a split APK set in merge order and merges them into a
//! single APK through an external merge tool.

use clap::Parser;
use clap::error::{ContextKind, ContextValue, ErrorKind};
use miette::Diagnostic;

mod bundle;
mod cli;
mod commands;
mod config;
mod domain;
mod error;
mod logging;
mod operations;
mod planner;
mod temp;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use error::AppError;

/// Translate clap failures that have a dedicated error of their own
fn parse_error(err: &clap::Error) -> Option<AppError> {
    match err.kind() {
        ErrorKind::InvalidSubcommand => Some(AppError::InvalidAction {
            action: context_text(err, ContextKind::InvalidSubcommand),
        }),
        ErrorKind::MissingRequiredArgument => Some(AppError::MissingArgument {
            name: context_text(err, ContextKind::InvalidArg),
        }),
        _ => None,
    }
}

fn context_text(err: &clap::Error, kind: ContextKind) -> String {
    match err.get(kind) {
        Some(ContextValue::String(value)) => value.clone(),
        Some(ContextValue::Strings(values)) => values.join(", "),
        _ => String::new(),
    }
}

fn report(err: &AppError) {
    eprintln!("Error: {err}");
    if let AppError::MergeFailed { detail, .. } = err {
        for line in detail.lines() {
            eprintln!("  {line}");
        }
    }
    if let Some(help) = err.help() {
        eprintln!("help: {help}");
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match parse_error(&e) {
            Some(err) => {
                report(&err);
                std::process::exit(1);
            }
            None if matches!(
                e.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
            {
                e.exit()
            }
            None => {
                let _ = e.print();
                std::process::exit(1);
            }
        },
    };

    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::List(args) => commands::list::run(cli.config, args),
        Commands::Merge(args) => commands::merge::run(cli.config, cli.quiet, args),
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }
}
