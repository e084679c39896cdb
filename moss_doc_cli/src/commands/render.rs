//! `mossdoc render`: batch processing of HTML pages

use super::CommandResult;
use crate::cli::RenderArgs;
use moss_doc::{process_paths, BatchConfig, DocConfig};
use moss_highlight::logging;
use moss_highlight::{log_error, log_info, BlockCommentScan};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

/// Configuration file or environment defaults, then command line overrides
pub fn effective_config(config_path: Option<&Path>) -> Result<DocConfig, moss_doc::ConfigError> {
    match config_path {
        Some(path) => DocConfig::load(path).map_err(|err| {
            log_error!(err.error_code(), "Configuration rejected", "reason" => err);
            err
        }),
        None => Ok(DocConfig::from_env()),
    }
}

fn apply_overrides(config: &mut DocConfig, args: &RenderArgs) {
    if args.ordered {
        config.toc.ordered = true;
    }
    if args.legacy_comments {
        config.highlight.block_comment_scan = BlockCommentScan::Legacy;
    }
    if args.fail_fast {
        config.batch.fail_fast = true;
    }
    if args.no_recursive {
        config.batch.recursive = false;
    }
    if let Some(threads) = args.threads {
        config.batch.max_threads = Some(threads);
    }
}

fn batch_config(config: &DocConfig, args: &RenderArgs) -> BatchConfig {
    let mut batch = BatchConfig::from_doc_config(config);
    if config.batch.max_threads.is_none() {
        batch.max_threads = num_cpus::get().max(1);
    }
    batch.output_dir = args.out.clone();
    batch
}

pub fn run(args: &RenderArgs) -> CommandResult {
    let mut config = effective_config(args.config.as_deref())?;
    apply_overrides(&mut config, args);
    let batch = batch_config(&config, args);

    log_info!("Rendering pages",
        "inputs" => args.paths.len(),
        "threads" => batch.max_threads,
        "in_place" => batch.output_dir.is_none()
    );

    let results = process_paths(&args.paths, &config, &batch).map_err(|err| {
        log_error!(err.error_code(), "Batch could not start", "reason" => err);
        err
    })?;

    if let Some(report) = &args.report {
        fs::write(report, results.to_json()?)?;
    }

    println!("{}", results.summary());
    if results.has_failures() {
        logging::print_cargo_style_summary();
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn args(paths: Vec<PathBuf>) -> RenderArgs {
        RenderArgs {
            paths,
            out: None,
            config: None,
            ordered: false,
            threads: None,
            fail_fast: false,
            no_recursive: false,
            legacy_comments: false,
            report: None,
        }
    }

    #[test]
    fn test_overrides_win_over_config_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("moss.toml");
        fs::write(&config_path, "[toc]\nordered = false\n[batch]\nmax_threads = 2\n").unwrap();

        let mut render = args(vec![]);
        render.ordered = true;
        render.threads = Some(5);
        render.legacy_comments = true;

        let mut config = effective_config(Some(&config_path)).unwrap();
        apply_overrides(&mut config, &render);

        assert!(config.toc.ordered);
        assert_eq!(config.batch.max_threads, Some(5));
        assert_eq!(config.highlight.block_comment_scan, BlockCommentScan::Legacy);
        assert_eq!(batch_config(&config, &render).max_threads, 5);
    }

    #[test]
    fn test_thread_count_defaults_to_cpus() {
        let config = DocConfig::default();
        assert_eq!(batch_config(&config, &args(vec![])).max_threads, num_cpus::get().max(1));
    }

    #[test]
    fn test_run_writes_report_and_output() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        fs::write(input.path().join("post.html"), "<pre class=moss>if x end</pre>").unwrap();

        let mut render = args(vec![input.path().to_path_buf()]);
        render.out = Some(output.path().to_path_buf());
        render.report = Some(output.path().join("report.json"));

        let code = run(&render).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let page = fs::read_to_string(output.path().join("post.html")).unwrap();
        assert!(page.contains("<span class='keyword'>if</span>"));

        let report: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(output.path().join("report.json")).unwrap())
                .unwrap();
        assert_eq!(report["successful_files"][0]["regions"], 1);
    }

    #[test]
    fn test_run_fails_on_bad_page() {
        let input = tempdir().unwrap();
        fs::write(input.path().join("bad.html"), "<p id=toc></p><h3>no date</h3>").unwrap();

        let code = run(&args(vec![input.path().to_path_buf()])).unwrap();
        assert_eq!(code, ExitCode::FAILURE);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(run(&args(vec![dir.path().join("absent")])).is_err());
    }
}
