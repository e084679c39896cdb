//! Configuration for the moss highlighter
//!
//! `constants` holds the fixed lexical and markup tables; `runtime` holds the
//! preferences a caller may change per run.

pub mod constants;
pub mod runtime;

pub use runtime::{BlockCommentScan, HighlightPreferences, ParseScanModeError};
