// Internal modules
pub mod batch;
pub mod config;
pub mod document;
pub mod file_processor;
pub mod toc;

// Logging macros live in the highlighter crate
pub use moss_highlight::{log_debug, log_error, log_info, log_success, log_warning};

// Re-export key types for library consumers
pub use batch::{process_paths, BatchConfig, BatchError, BatchResults};
pub use config::{ConfigError, DocConfig};
pub use document::{process_document, DocumentError, ProcessedDocument};
pub use toc::{build_toc, HeadingHandle, TocError, TocStyle};
