//! Page-level processing: moss code regions and the dated table of contents

pub mod headings;
pub mod markup;
pub mod regions;

use crate::config::DocConfig;
use crate::toc::TocError;
use moss_highlight::logging::{codes, Code};
use moss_highlight::{log_success, HighlightMetrics};

pub use headings::{apply_toc, find_headings, HtmlHeading, TocOutcome};
pub use regions::{highlight_regions, RegionReport};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DocumentError {
    #[error("No element with id '{target_id}' to hold the table of contents")]
    TocTargetMissing { target_id: String },

    #[error(transparent)]
    Toc(#[from] TocError),

    #[error("Markup pattern failed to compile: {message}")]
    Pattern { message: String },
}

impl DocumentError {
    pub fn error_code(&self) -> Code {
        match self {
            DocumentError::TocTargetMissing { .. } => codes::document::TOC_TARGET_MISSING,
            DocumentError::Toc(err) => err.error_code(),
            DocumentError::Pattern { .. } => codes::system::INTERNAL_ERROR,
        }
    }
}

/// A page after both passes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedDocument {
    pub html: String,
    pub regions: usize,
    pub unclosed_regions: usize,
    pub toc_entries: usize,
    pub toc_written: bool,
    pub metrics: HighlightMetrics,
}

/// Highlight the code regions, then build the table of contents
pub fn process_document(html: &str, config: &DocConfig) -> Result<ProcessedDocument, DocumentError> {
    let regions = highlight_regions(html, &config.highlight)?;
    let toc = apply_toc(&regions.html, &config.toc)?;

    log_success!(codes::success::DOCUMENT_PROCESSED, "Document processed",
        "regions" => regions.regions,
        "toc_entries" => toc.entries
    );

    Ok(ProcessedDocument {
        html: toc.html,
        regions: regions.regions,
        unclosed_regions: regions.unclosed,
        toc_entries: toc.entries,
        toc_written: toc.target_found,
        metrics: regions.metrics,
    })
}
