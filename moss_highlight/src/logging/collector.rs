//! Error collector for batch file processing with cargo-style output

use super::codes;
use super::events::LogEvent;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Context information for file processing
#[derive(Debug, Clone)]
pub struct FileProcessingContext {
    pub file_path: PathBuf,
    pub file_id: usize,
    pub start_time: Instant,
}

impl FileProcessingContext {
    pub fn new(file_path: PathBuf, file_id: usize) -> Self {
        Self {
            file_path,
            file_id,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Counts over everything collected so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
    pub files_with_errors: usize,
    pub files_with_warnings: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

impl ProcessingSummary {
    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    pub fn has_warnings(&self) -> bool {
        self.total_warnings > 0
    }
}

/// Thread-safe collector of error and warning events, keyed by file
#[derive(Debug, Default)]
pub struct ErrorCollector {
    file_events: Mutex<BTreeMap<PathBuf, Vec<LogEvent>>>,
}

impl ErrorCollector {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means another worker panicked mid-push; the map
    // itself is still usable.
    fn events(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Vec<LogEvent>>> {
        self.file_events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record an event for a specific file. Only errors and warnings are kept.
    pub fn record_event(&self, file_path: &Path, event: LogEvent) {
        if !(event.is_error() || event.is_warning()) {
            return;
        }
        self.events()
            .entry(file_path.to_path_buf())
            .or_default()
            .push(event);
    }

    /// Drop what was recorded for one file, before it is processed again
    pub fn forget(&self, file_path: &Path) {
        self.events().remove(file_path);
    }

    pub fn events_for(&self, file_path: &Path) -> Vec<LogEvent> {
        self.events().get(file_path).cloned().unwrap_or_default()
    }

    pub fn summary(&self) -> ProcessingSummary {
        let events = self.events();
        let mut summary = ProcessingSummary::default();
        for file_events in events.values() {
            let errors = file_events.iter().filter(|e| e.is_error()).count();
            let warnings = file_events.iter().filter(|e| e.is_warning()).count();
            summary.total_errors += errors;
            summary.total_warnings += warnings;
            if errors > 0 {
                summary.files_with_errors += 1;
            }
            if warnings > 0 {
                summary.files_with_warnings += 1;
            }
        }
        summary
    }

    pub fn clear(&self) {
        self.events().clear();
    }
}

/// Render collected events grouped by file, in the style of cargo diagnostics
pub fn format_cargo_style_errors(collector: &ErrorCollector) -> String {
    let events = collector.events();
    let mut output = String::new();

    for (path, file_events) in events.iter() {
        for event in file_events {
            let label = if event.is_error() { "error" } else { "warning" };
            output.push_str(&format!("{}[{}]: {}\n", label, event.code, event.message));
            output.push_str(&format!("  --> {}\n", path.display()));
            for (key, value) in &event.context {
                if key != "file" && key != "file_id" {
                    output.push_str(&format!("   = {}: {}\n", key, value));
                }
            }
            if let Some(action) = codes::get_action(event.code.as_str()) {
                output.push_str(&format!("   = help: {}\n", action));
            }
            output.push('\n');
        }
    }

    drop(events);
    let summary = collector.summary();
    if summary.has_errors() || summary.has_warnings() {
        output.push_str(&format!(
            "{} error(s) in {} file(s), {} warning(s) in {} file(s)\n",
            summary.total_errors,
            summary.files_with_errors,
            summary.total_warnings,
            summary.files_with_warnings
        ));
    } else {
        output.push_str("No errors or warnings\n");
    }
    output
}
