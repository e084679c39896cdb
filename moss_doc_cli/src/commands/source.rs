//! `mossdoc highlight` and `mossdoc tokens`

use super::CommandResult;
use crate::cli::SourceArgs;
use moss_highlight::{tokenize_with_preferences, BlockCommentScan, HighlightPreferences, Highlighter};
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

fn preferences(args: &SourceArgs) -> HighlightPreferences {
    let prefs = HighlightPreferences::from_env();
    if args.legacy_comments {
        prefs.with_block_comment_scan(BlockCommentScan::Legacy)
    } else {
        prefs
    }
}

/// Read the whole input, `-` meaning stdin
pub fn read_source(input: &str) -> io::Result<String> {
    if input == "-" {
        let mut source = String::new();
        io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        fs::read_to_string(input)
    }
}

pub fn highlight(args: &SourceArgs) -> CommandResult {
    let source = read_source(&args.input)?;
    let mut highlighter = Highlighter::with_preferences(preferences(args));

    let mut stdout = io::stdout().lock();
    stdout.write_all(highlighter.highlight(&source).as_bytes())?;
    stdout.flush()?;

    if args.metrics {
        eprintln!("{}", serde_json::to_string_pretty(highlighter.metrics())?);
    }
    Ok(ExitCode::SUCCESS)
}

pub fn tokens(args: &SourceArgs) -> CommandResult {
    let source = read_source(&args.input)?;
    let tokens = tokenize_with_preferences(&source, &preferences(args));
    println!("{}", serde_json::to_string_pretty(&tokens)?);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_source_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fac.moss");
        fs::write(&path, "sub fac(n) end").unwrap();
        assert_eq!(read_source(path.to_str().unwrap()).unwrap(), "sub fac(n) end");
        assert!(read_source(dir.path().join("none").to_str().unwrap()).is_err());
    }

    #[test]
    fn test_legacy_flag_selects_scan_mode() {
        let args = SourceArgs {
            input: "-".to_string(),
            legacy_comments: true,
            metrics: false,
        };
        assert_eq!(preferences(&args).block_comment_scan, BlockCommentScan::Legacy);
    }
}
