//! Command line definition

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "mossdoc",
    version,
    about = "Highlight moss code and build dated tables of contents in HTML pages"
)]
pub struct Cli {
    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Highlight raw moss source and print the markup
    Highlight(SourceArgs),

    /// Print the token stream of moss source as JSON
    Tokens(SourceArgs),

    /// Process HTML pages in place or into an output directory
    Render(RenderArgs),

    /// Print the effective configuration as TOML
    Config {
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Source file, or `-` for stdin
    #[arg(default_value = "-")]
    pub input: String,

    /// Use the historical block comment scan
    #[arg(long)]
    pub legacy_comments: bool,

    /// Print highlight metrics to stderr as JSON
    #[arg(long)]
    pub metrics: bool,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// HTML files or directories
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Write results here instead of rewriting the inputs
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Numbered table of contents
    #[arg(long)]
    pub ordered: bool,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(long, value_name = "N")]
    pub threads: Option<usize>,

    /// Stop at the first failing page
    #[arg(long)]
    pub fail_fast: bool,

    /// Only the top level of each directory
    #[arg(long)]
    pub no_recursive: bool,

    /// Use the historical block comment scan
    #[arg(long)]
    pub legacy_comments: bool,

    /// Write the batch results as JSON
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

impl Cli {
    /// `RUST_LOG`-style default filter for the chosen verbosity
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
