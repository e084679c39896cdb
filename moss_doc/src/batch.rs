//! Batch processing of page files
//!
//! Inputs may be files or directories. Directories are walked for files with
//! an accepted extension; each page is read, processed and written back in
//! place or under an output directory. Integrates with the global error
//! collector through the per-thread file context.

use crate::config::DocConfig;
use crate::document::{process_document, DocumentError};
use crate::file_processor::{process_file, write_file, FileProcessorError};
use moss_highlight::logging::{self, codes, Code};
use moss_highlight::HighlightMetrics;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};
use walkdir::WalkDir;

// ============================================================================
// BATCH PROCESSING TYPES
// ============================================================================

/// Batch processing configuration
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub max_threads: usize,
    pub recursive: bool,
    pub fail_fast: bool,
    /// Write results here, mirroring the input layout; `None` rewrites in place
    pub output_dir: Option<PathBuf>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_threads: thread::available_parallelism()
                .map(|n| n.get().min(8))
                .unwrap_or(4),
            recursive: true,
            fail_fast: false,
            output_dir: None,
        }
    }
}

impl BatchConfig {
    /// Settings from the `[batch]` section; an unset thread count keeps the
    /// default
    pub fn from_doc_config(config: &DocConfig) -> Self {
        let defaults = Self::default();
        Self {
            max_threads: config.batch.max_threads.unwrap_or(defaults.max_threads).max(1),
            recursive: config.batch.recursive,
            fail_fast: config.batch.fail_fast,
            output_dir: None,
        }
    }
}

/// A page that was processed and written
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub output: PathBuf,
    pub regions: usize,
    pub unclosed_regions: usize,
    pub toc_entries: usize,
    pub bytes_in: usize,
    pub bytes_out: usize,
}

/// A page that could not be processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub code: String,
    pub message: String,
}

/// Why a single page failed
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error(transparent)]
    File(#[from] FileProcessorError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl PageError {
    pub fn error_code(&self) -> Code {
        match self {
            PageError::File(err) => err.error_code(),
            PageError::Document(err) => err.error_code(),
        }
    }

    /// Whether the registry marks this failure as stopping the batch
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}

/// Batch processing results
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchResults {
    pub successful_files: Vec<FileReport>,
    pub failed_files: Vec<FileFailure>,
    pub processing_duration: Duration,
    pub files_discovered: usize,
    pub files_processed: usize,
    pub metrics: HighlightMetrics,
}

impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_count(&self) -> usize {
        self.successful_files.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failed_files.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed_files.is_empty()
    }

    pub fn success_rate(&self) -> f64 {
        if self.files_processed == 0 {
            0.0
        } else {
            self.successful_files.len() as f64 / self.files_processed as f64
        }
    }

    fn add(&mut self, outcome: PageOutcome) {
        self.files_processed += 1;
        match outcome {
            PageOutcome::Done(report, metrics) => {
                self.metrics.merge(&metrics);
                self.successful_files.push(report);
            }
            PageOutcome::Failed(failure, _) => self.failed_files.push(failure),
        }
    }

    /// Pretty-printed JSON report
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn summary(&self) -> String {
        format!(
            "Batch processing completed: {} files processed, {} successful ({:.1}%), {} failed, {:.2}s total",
            self.files_processed,
            self.success_count(),
            self.success_rate() * 100.0,
            self.failure_count(),
            self.processing_duration.as_secs_f64()
        )
    }
}

/// Batch processing errors
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Input path not found: {path}")]
    PathNotFound { path: String },

    #[error("No matching files found in: {path}")]
    NoFilesFound { path: String },

    #[error("Directory traversal failed: {error}")]
    TraversalFailed { error: String },
}

impl BatchError {
    pub fn error_code(&self) -> Code {
        match self {
            BatchError::PathNotFound { .. } => codes::batch::DIRECTORY_NOT_FOUND,
            BatchError::NoFilesFound { .. } => codes::batch::NO_FILES_FOUND,
            BatchError::TraversalFailed { .. } => codes::batch::TRAVERSAL_FAILED,
        }
    }
}

// ============================================================================
// FILE DISCOVERY
// ============================================================================

/// A page to process and where it sits relative to its input root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub relative: PathBuf,
}

impl DiscoveredFile {
    fn output_path(&self, output_dir: Option<&Path>) -> PathBuf {
        match output_dir {
            Some(dir) => dir.join(&self.relative),
            None => self.path.clone(),
        }
    }
}

/// Expand the inputs into a sorted, de-duplicated list of pages. Files named
/// directly are taken whatever their extension.
pub fn discover_files(
    inputs: &[PathBuf],
    doc: &DocConfig,
    config: &BatchConfig,
) -> Result<Vec<DiscoveredFile>, BatchError> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_file() {
            files.push(DiscoveredFile {
                path: input.clone(),
                relative: input.file_name().map(PathBuf::from).unwrap_or_default(),
            });
            continue;
        }
        if !input.is_dir() {
            return Err(BatchError::PathNotFound {
                path: input.display().to_string(),
            });
        }

        crate::log_info!("Starting file discovery",
            "directory" => input.display(),
            "recursive" => config.recursive
        );

        let mut walker = WalkDir::new(input).follow_links(false);
        if !config.recursive {
            walker = walker.max_depth(1);
        }

        let before = files.len();
        for entry in walker {
            let entry = entry.map_err(|e| BatchError::TraversalFailed {
                error: e.to_string(),
            })?;
            if !entry.file_type().is_file() || !doc.files.accepts(entry.path()) {
                continue;
            }
            let relative = entry
                .path()
                .strip_prefix(input)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| entry.path().to_path_buf());
            files.push(DiscoveredFile {
                path: entry.into_path(),
                relative,
            });
        }

        if files.len() == before {
            crate::log_warning!(code = codes::batch::NO_FILES_FOUND,
                "No matching files in directory",
                "directory" => input.display()
            );
        }
    }

    if files.is_empty() {
        let path = inputs
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(BatchError::NoFilesFound { path });
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files.dedup_by(|a, b| a.path == b.path);

    crate::log_info!("File discovery completed", "files_found" => files.len());

    Ok(files)
}

// ============================================================================
// PER-FILE PROCESSING
// ============================================================================

enum PageOutcome {
    Done(FileReport, HighlightMetrics),
    Failed(FileFailure, bool),
}

impl PageOutcome {
    /// A failure stops the batch under fail-fast or when its code requires it
    fn stops_batch(&self, fail_fast: bool) -> bool {
        match self {
            PageOutcome::Done(..) => false,
            PageOutcome::Failed(_, halts) => fail_fast || *halts,
        }
    }
}

/// Read, process and write one page
pub fn process_page(
    file: &DiscoveredFile,
    doc: &DocConfig,
    output_dir: Option<&Path>,
) -> Result<(FileReport, HighlightMetrics), PageError> {
    let loaded = process_file(&file.path, &doc.files)?;
    let processed = process_document(&loaded.source, doc)?;
    let output = file.output_path(output_dir);

    // Pages without regions or a table of contents are only copied when
    // they go to a separate output directory
    let unchanged = processed.html == loaded.source;
    if !(unchanged && output_dir.is_none()) {
        write_file(&output, &processed.html)?;
    }

    let report = FileReport {
        path: file.path.clone(),
        output,
        regions: processed.regions,
        unclosed_regions: processed.unclosed_regions,
        toc_entries: processed.toc_entries,
        bytes_in: loaded.source.len(),
        bytes_out: processed.html.len(),
    };
    Ok((report, processed.metrics))
}

fn run_page(
    file: &DiscoveredFile,
    file_id: usize,
    doc: &DocConfig,
    output_dir: Option<&Path>,
) -> PageOutcome {
    logging::global_error_collector().forget(&file.path);
    logging::with_file_context(file.path.clone(), file_id, || {
        match process_page(file, doc, output_dir) {
            Ok((report, metrics)) => PageOutcome::Done(report, metrics),
            Err(err) => {
                crate::log_error!(err.error_code(), "File processing failed",
                    "reason" => err
                );
                PageOutcome::Failed(
                    FileFailure {
                        path: file.path.clone(),
                        code: err.error_code().as_str().to_string(),
                        message: err.to_string(),
                    },
                    err.requires_halt(),
                )
            }
        }
    })
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

/// Process files one after another
pub fn process_files_sequential(
    files: &[DiscoveredFile],
    doc: &DocConfig,
    config: &BatchConfig,
) -> BatchResults {
    let start_time = Instant::now();
    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    crate::log_info!("Starting sequential batch processing", "files" => files.len());

    for (file_id, file) in files.iter().enumerate() {
        let outcome = run_page(file, file_id, doc, config.output_dir.as_deref());
        let stop = outcome.stops_batch(config.fail_fast);
        results.add(outcome);

        if stop {
            crate::log_warning!("Stopping batch processing",
                "fail_fast" => config.fail_fast,
                "skipped" => files.len() - results.files_processed
            );
            break;
        }
    }

    results.processing_duration = start_time.elapsed();
    results
}

/// Process files on up to `config.max_threads` scoped worker threads. Each
/// worker takes a contiguous slice; results keep discovery order.
pub fn process_files_parallel(
    files: &[DiscoveredFile],
    doc: &DocConfig,
    config: &BatchConfig,
) -> BatchResults {
    let start_time = Instant::now();
    let mut results = BatchResults::new();
    results.files_discovered = files.len();

    if files.is_empty() {
        return results;
    }

    let threads = config.max_threads.clamp(1, files.len());
    let chunk_size = files.len().div_ceil(threads);
    let stop = AtomicBool::new(false);
    let output_dir = config.output_dir.as_deref();

    crate::log_info!("Starting parallel batch processing",
        "files" => files.len(),
        "threads" => threads,
        "chunk_size" => chunk_size
    );

    let per_worker: Vec<Vec<PageOutcome>> = thread::scope(|scope| {
        let handles: Vec<_> = files
            .chunks(chunk_size)
            .enumerate()
            .map(|(chunk_index, chunk)| {
                let stop = &stop;
                scope.spawn(move || {
                    let mut outcomes = Vec::with_capacity(chunk.len());
                    for (offset, file) in chunk.iter().enumerate() {
                        if stop.load(Ordering::Relaxed) {
                            break;
                        }
                        let outcome =
                            run_page(file, chunk_index * chunk_size + offset, doc, output_dir);
                        if outcome.stops_batch(config.fail_fast) {
                            stop.store(true, Ordering::Relaxed);
                        }
                        outcomes.push(outcome);
                    }
                    outcomes
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle.join().unwrap_or_else(|_| {
                    crate::log_error!(codes::system::INTERNAL_ERROR, "Worker thread panicked");
                    Vec::new()
                })
            })
            .collect()
    });

    for outcome in per_worker.into_iter().flatten() {
        results.add(outcome);
    }

    if stop.load(Ordering::Relaxed) {
        crate::log_warning!("Stopping batch processing",
            "fail_fast" => config.fail_fast,
            "skipped" => files.len() - results.files_processed
        );
    }

    results.processing_duration = start_time.elapsed();
    results
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Discover and process every page under `inputs`
pub fn process_paths(
    inputs: &[PathBuf],
    doc: &DocConfig,
    config: &BatchConfig,
) -> Result<BatchResults, BatchError> {
    let files = discover_files(inputs, doc, config)?;

    let results = if config.max_threads <= 1 || files.len() == 1 {
        process_files_sequential(&files, doc, config)
    } else {
        process_files_parallel(&files, doc, config)
    };

    crate::log_success!(codes::success::BATCH_COMPLETE, "Batch processing completed",
        "files_processed" => results.files_processed,
        "successful" => results.success_count(),
        "failed" => results.failure_count(),
        "duration_ms" => format!("{:.2}", results.processing_duration.as_secs_f64() * 1000.0)
    );

    Ok(results)
}
