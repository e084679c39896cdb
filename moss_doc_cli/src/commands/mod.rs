//! Subcommand implementations

pub mod render;
pub mod source;

use moss_doc::DocConfig;
use std::error::Error;
use std::path::Path;
use std::process::ExitCode;

pub type CommandResult = Result<ExitCode, Box<dyn Error>>;

/// `mossdoc config`
pub fn show_config(config_path: Option<&Path>) -> CommandResult {
    let config: DocConfig = render::effective_config(config_path)?;
    print!("{}", config.to_toml_string()?);
    Ok(ExitCode::SUCCESS)
}
