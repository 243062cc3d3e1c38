//! CLI definitions using clap derive API
//!
//! Each command's argument type lives in its own submodule:
//! - list: List command arguments
//! - merge: Merge command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod list;
pub mod merge;

pub use list::ListArgs;
pub use merge::MergeArgs;

/// splitmerge - Android split APK merger
///
/// List the modules of a split APK set in merge order, or merge them into a single APK.
#[derive(Parser, Debug)]
#[command(
    name = "splitmerge",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "List and merge Android split APK sets",
    long_about = "splitmerge picks a base module for a set of split APKs (a directory of .apk files \
                  or an .apks/.apkm/.xapk archive), orders the remaining modules after it and \
                  merges them into one installable APK using an external merge tool.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  splitmerge list ./splits                          \x1b[90m# Print merge order\x1b[0m\n   \
                  splitmerge list app.apks --json                   \x1b[90m# Merge order as JSON\x1b[0m\n   \
                  splitmerge merge ./splits app.apk                 \x1b[90m# Merge every module\x1b[0m\n   \
                  splitmerge merge ./splits app.apk config.xxhdpi   \x1b[90m# Merge, skipping a module\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration file (defaults to <config dir>/splitmerge/config.yaml)
    #[arg(long, short = 'c', global = true, env = "SPLITMERGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Hide the progress spinner
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print modules in merge order, base first
    List(ListArgs),

    /// Merge modules into a single APK
    Merge(MergeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use serial_test::serial;

    #[test]
    fn test_cli_parsing_list() {
        let cli = Cli::try_parse_from(["splitmerge", "list", "splits"]).unwrap();
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.modules_dir, PathBuf::from("splits"));
                assert!(!args.json);
            }
            Commands::Merge(_) => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_parsing_merge_all_positionals() {
        let cli = Cli::try_parse_from([
            "splitmerge",
            "merge",
            "splits",
            "out.apk",
            "feature1, Feature2.APK",
            "TRUE",
        ])
        .unwrap();
        match cli.command {
            Commands::Merge(args) => {
                assert_eq!(args.modules_dir, PathBuf::from("splits"));
                assert_eq!(args.output, PathBuf::from("out.apk"));
                assert_eq!(args.skip_modules.as_deref(), Some("feature1, Feature2.APK"));
                assert!(args.sort_entries());
            }
            Commands::List(_) => panic!("Expected Merge command"),
        }
    }

    #[test]
    fn test_cli_parsing_global_flags() {
        let cli = Cli::try_parse_from([
            "splitmerge",
            "list",
            "splits",
            "--verbose",
            "--quiet",
            "--config",
            "tool.yaml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(cli.quiet);
        assert_eq!(cli.config, Some(PathBuf::from("tool.yaml")));
    }

    #[test]
    fn test_cli_unknown_action() {
        let err = Cli::try_parse_from(["splitmerge", "explode", "splits"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_cli_merge_missing_output() {
        let err = Cli::try_parse_from(["splitmerge", "merge", "splits"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    #[serial]
    fn test_cli_config_from_env() {
        unsafe {
            std::env::set_var("SPLITMERGE_CONFIG", "/tmp/env-config.yaml");
        }
        let cli = Cli::try_parse_from(["splitmerge", "list", "splits"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/env-config.yaml")));
        unsafe {
            std::env::remove_var("SPLITMERGE_CONFIG");
        }
    }

    #[test]
    #[serial]
    fn test_cli_config_flag_overrides_env() {
        unsafe {
            std::env::set_var("SPLITMERGE_CONFIG", "/tmp/env-config.yaml");
        }
        let cli =
            Cli::try_parse_from(["splitmerge", "-c", "/tmp/flag-config.yaml", "list", "splits"])
                .unwrap();
        // Flag should override environment variable
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/flag-config.yaml")));
        unsafe {
            std::env::remove_var("SPLITMERGE_CONFIG");
        }
    }
}
