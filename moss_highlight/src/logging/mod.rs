//! Logging for the moss tools
//!
//! Events carry a [`Code`] and key/value context and are handed to the `log`
//! facade, so whichever logger the binary installs (env_logger for
//! `mossdoc`) decides where they go. Errors and warnings raised while a file
//! context is set are also kept by the global [`ErrorCollector`] for the
//! cargo-style summary printed at the end of a batch.

pub mod codes;
pub mod collector;
pub mod events;
pub mod macros;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub use codes::Code;
pub use collector::{ErrorCollector, FileProcessingContext, ProcessingSummary};
pub use events::{LogEvent, LogLevel};

/// `log` target used for every event emitted through this module
pub const LOG_TARGET: &str = "moss";

static GLOBAL_ERROR_COLLECTOR: OnceLock<ErrorCollector> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileProcessingContext>> = const { RefCell::new(None) };
}

// ============================================================================
// GLOBAL ACCESS
// ============================================================================

/// The process-wide collector, created on first use.
///
/// It lives as long as the process and holds the events of the latest run
/// of each file: the batch driver calls [`ErrorCollector::forget`] for a
/// file before processing it, so memory grows with the number of distinct
/// files, not with the number of runs.
pub fn global_error_collector() -> &'static ErrorCollector {
    GLOBAL_ERROR_COLLECTOR.get_or_init(ErrorCollector::new)
}

// ============================================================================
// FILE CONTEXT MANAGEMENT
// ============================================================================

/// Set file context for the current thread
pub fn set_file_context(file_path: PathBuf, file_id: usize) {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(FileProcessingContext::new(file_path, file_id));
    });
}

/// Clear file context for the current thread
pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with file context
pub fn with_file_context<F, R>(file_path: PathBuf, file_id: usize, f: F) -> R
where
    F: FnOnce() -> R,
{
    set_file_context(file_path, file_id);
    let result = f();
    clear_file_context();
    result
}

/// Current file context (used by the macros)
pub fn get_current_file_context() -> Option<FileProcessingContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

// ============================================================================
// MACRO SUPPORT FUNCTIONS
// ============================================================================

/// Attach the thread's file context, forward to `log`, and collect
/// errors/warnings for the file
pub fn dispatch(event: LogEvent) {
    let level = event.level.to_log_level();
    let file_ctx = get_current_file_context();

    let event = match &file_ctx {
        Some(ctx) => event
            .with_context("file", &ctx.file_path.display().to_string())
            .with_context("file_id", &ctx.file_id.to_string()),
        None => event,
    };

    log::log!(target: LOG_TARGET, level, "{}", event);

    if let Some(ctx) = file_ctx {
        global_error_collector().record_event(&ctx.file_path, event);
    }
}

/// Whether the installed logger accepts debug records for [`LOG_TARGET`]
pub fn debug_enabled() -> bool {
    log::log_enabled!(target: LOG_TARGET, log::Level::Debug)
}

/// Used by `log_error!`
pub fn log_error_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_pairs(LogEvent::error(code, message), context));
}

/// Used by `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_pairs(LogEvent::success(code, message), context));
}

/// Used by `log_info!`
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_pairs(LogEvent::info(message), context));
}

/// Used by `log_warning!`
pub fn log_warning_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_pairs(LogEvent::warning(message), context));
}

/// Used by `log_warning!(code = ...)`
pub fn log_coded_warning_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_pairs(LogEvent::coded_warning(code, message), context));
}

/// Used by `log_debug!`
pub fn log_debug_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch(with_pairs(LogEvent::debug(message), context));
}

fn with_pairs(event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    context
        .into_iter()
        .fold(event, |event, (key, value)| event.with_context(key, value))
}

// ============================================================================
// BATCH REPORTING
// ============================================================================

pub fn get_file_errors(file_path: &Path) -> Vec<LogEvent> {
    global_error_collector().events_for(file_path)
}

pub fn format_cargo_style_summary() -> String {
    collector::format_cargo_style_errors(global_error_collector())
}

/// Print the cargo-style summary of everything collected so far
pub fn print_cargo_style_summary() {
    eprint!("{}", format_cargo_style_summary());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_context_scoping() {
        assert!(get_current_file_context().is_none());

        let seen = with_file_context(PathBuf::from("ctx.html"), 7, || {
            get_current_file_context().map(|ctx| (ctx.file_path, ctx.file_id))
        });

        assert_eq!(seen, Some((PathBuf::from("ctx.html"), 7)));
        assert!(get_current_file_context().is_none());
    }

    #[test]
    fn test_errors_in_file_context_are_collected() {
        let path = PathBuf::from("collected-by-mod-test.html");
        with_file_context(path.clone(), 1, || {
            crate::log_error!(codes::toc::MISSING_DATE, "Heading has no date", "index" => 2);
            crate::log_info!("not collected");
        });

        let events = get_file_errors(&path);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].context_value("index"), Some("2"));
        assert_eq!(events[0].context_value("file_id"), Some("1"));
    }

    #[test]
    fn test_events_outside_file_context_are_not_collected() {
        crate::log_warning!("no file here");
        assert!(get_file_errors(Path::new("")).is_empty());
    }
}
