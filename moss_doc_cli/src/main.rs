//! # mossdoc
//!
//! Command line front end: highlight moss source, dump its tokens, or
//! post-process HTML pages (code regions and dated table of contents).

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Command};
use moss_highlight::logging::codes;
use moss_highlight::{log_error, log_success};
use std::error::Error;
use std::process::ExitCode;

fn init_logging(cli: &Cli) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .format_timestamp(None)
        .init();
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli);

    log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "mossdoc starting",
        "version" => env!("CARGO_PKG_VERSION")
    );

    let result = match &cli.command {
        Command::Highlight(args) => commands::source::highlight(args),
        Command::Tokens(args) => commands::source::tokens(args),
        Command::Render(args) => commands::render::run(args),
        Command::Config { config } => commands::show_config(config.as_deref()),
    };

    if let Err(err) = &result {
        log_error!(codes::system::INTERNAL_ERROR, "mossdoc failed", "reason" => err);
    }
    result
}
