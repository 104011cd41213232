//! CLI definitions for pipelog
//!
//! This module contains the clap CLI structure definitions, separated from main.rs
//! so completions can be generated from the same command tree.

use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;

/// Build clap styles for the CLI.
///
/// - Green: headers, usage, command names
/// - White: descriptions, placeholders (renders as light gray on dark terminals)
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "pipelog")]
#[command(about = "[ pipelog ] - reassemble multi-line pipe-delimited logs and summarize errors")]
#[command(
    long_about = "pipelog - Reassemble multi-line, pipe-delimited application logs.

Every log entry starts with a `MM/DD/YYYY HH:MM:SS.mmm` timestamp. Lines without
that prefix (stack traces, wrapped messages) are joined onto the entry above them.
Entries are then split on `|` and counted by their state code (ERR, WRN, INF...).
Error and warning details are exported as CSV files.

QUICK START:
    pipelog analyze                  Analyze ./logs/*.log, write ./resultados/
    pipelog analyze /var/log/app     Analyze another folder
    pipelog analyze --json           Print the run summary as JSON
    pipelog config init              Write the default config file"
)]
#[command(version)]
#[command(styles = build_cli_styles())]
pub struct Cli {
    /// Use this config file instead of ~/.config/pipelog/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze every log file in a folder
    #[command(long_about = "Analyze every log file in a folder.

Files are matched by extension (case-insensitive, not recursive) and processed
in name order. Unreadable files are reported and skipped; the run continues.
Result CSVs are written to the output folder unless --no-export is given.

EXAMPLES:
    pipelog analyze                        Use the configured input folder
    pipelog analyze ./logs --ext txt       Read *.txt instead of *.log
    pipelog analyze --states WRN,CRT       Capture more state codes (ERR always)
    pipelog analyze --jobs 4               Read up to 4 files in parallel
    pipelog analyze --no-export --json     Only print the JSON summary")]
    Analyze {
        /// Folder holding the log files
        #[arg(help = "Folder holding the log files (default: [input] directory)")]
        dir: Option<PathBuf>,

        /// Log file extension, without the dot
        #[arg(long, value_name = "EXT")]
        ext: Option<String>,

        /// Folder for the result files
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Number of files read in parallel
        #[arg(long, short = 'j', value_name = "N")]
        jobs: Option<usize>,

        /// State codes whose records are captured in full
        #[arg(long, value_delimiter = ',', value_name = "STATES")]
        states: Option<Vec<String>>,

        /// Skip writing result files
        #[arg(long)]
        no_export: bool,

        /// Print the JSON summary instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(long_about = "Generate a shell completion script on stdout.

EXAMPLES:
    pipelog completions --shell bash > ~/.local/share/bash-completion/completions/pipelog
    pipelog completions --shell zsh > ~/.zfunc/_pipelog")]
    Completions {
        /// Shell to generate completions for
        #[arg(long, value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    #[command(long_about = "Display the effective configuration in TOML format.

Missing fields are filled with their defaults.

EXAMPLE:
    pipelog config show")]
    Show,
    /// Print the config file location
    Path,
    /// Write the default configuration file
    #[command(long_about = "Write the default configuration file.

Refuses to overwrite an existing file unless --force is given.

EXAMPLE:
    pipelog config init --force")]
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}
