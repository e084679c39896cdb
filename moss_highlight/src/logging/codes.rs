//! Consolidated error codes and classification system
//!
//! Single source of truth for the codes attached to log events, with the
//! metadata the batch driver uses to decide whether to stop and the error
//! summary uses for its help lines.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR METADATA
// ============================================================================

/// What the batch driver and the error summary need to know about a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    /// Stop the whole batch, not just the current file
    pub requires_halt: bool,
    pub recommended_action: &'static str,
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
}

pub mod config {
    use super::Code;

    pub const CONFIG_UNREADABLE: Code = Code::new("C001");
    pub const CONFIG_INVALID: Code = Code::new("C002");
}

pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("F001");
    pub const FILE_TOO_LARGE: Code = Code::new("F002");
    pub const INVALID_ENCODING: Code = Code::new("F003");
    pub const IO_ERROR: Code = Code::new("F004");
    pub const WRITE_FAILED: Code = Code::new("F005");
}

pub mod document {
    use super::Code;

    pub const TOC_TARGET_MISSING: Code = Code::new("D001");
    pub const UNCLOSED_REGION: Code = Code::new("D002");
}

pub mod toc {
    use super::Code;

    pub const MISSING_DATE: Code = Code::new("T001");
    pub const INVALID_DATE_CODE: Code = Code::new("T002");
}

pub mod batch {
    use super::Code;

    pub const DIRECTORY_NOT_FOUND: Code = Code::new("B001");
    pub const NO_FILES_FOUND: Code = Code::new("B002");
    pub const TRAVERSAL_FAILED: Code = Code::new("B003");
}

pub mod success {
    use super::Code;

    pub const DOCUMENT_PROCESSED: Code = Code::new("S001");
    pub const TOC_BUILT: Code = Code::new("S002");
    pub const FILE_WRITTEN: Code = Code::new("S003");
    pub const BATCH_COMPLETE: Code = Code::new("S004");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("S005");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let entries = [
            (system::INTERNAL_ERROR, true, "Report the failing input"),
            (config::CONFIG_UNREADABLE, true, "Check the --config path"),
            (config::CONFIG_INVALID, true, "Fix the reported key"),
            (file_processing::FILE_NOT_FOUND, false, "Check the input path"),
            (file_processing::FILE_TOO_LARGE, false, "Raise files.max_file_size"),
            (file_processing::INVALID_ENCODING, false, "Re-encode the file as UTF-8"),
            (file_processing::IO_ERROR, false, "Check permissions"),
            // Later pages share the output location
            (file_processing::WRITE_FAILED, true, "Check the output directory"),
            (document::TOC_TARGET_MISSING, false,
                "Add an element with id=\"toc\" or disable toc.require_target"),
            (document::UNCLOSED_REGION, false, "Close the element"),
            (toc::MISSING_DATE, false, "Add data-date=\"YYYYMMDD\""),
            (toc::INVALID_DATE_CODE, false, "Fix the data-date attribute"),
            (batch::DIRECTORY_NOT_FOUND, true, "Check the input path"),
            (batch::NO_FILES_FOUND, false, "Check files.extensions"),
            (batch::TRAVERSAL_FAILED, true, "Check permissions"),
        ];

        entries
            .into_iter()
            .map(|(code, requires_halt, action)| {
                (
                    code.as_str(),
                    ErrorMetadata {
                        code: code.as_str(),
                        requires_halt,
                        recommended_action: action,
                    },
                )
            })
            .collect()
    })
}

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Unknown codes never halt
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

pub fn get_action(code: &str) -> Option<&'static str> {
    get_error_metadata(code).map(|metadata| metadata.recommended_action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let meta = get_error_metadata(toc::INVALID_DATE_CODE.as_str()).unwrap();
        assert_eq!(meta.code, "T002");
        assert!(!requires_halt("T002"));
        assert!(requires_halt(batch::DIRECTORY_NOT_FOUND.as_str()));
        assert!(requires_halt(file_processing::WRITE_FAILED.as_str()));
        assert_eq!(get_action("F003"), Some("Re-encode the file as UTF-8"));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert!(!requires_halt("X999"));
        assert_eq!(get_action("X999"), None);
    }

    #[test]
    fn test_success_codes_are_not_errors() {
        assert!(get_error_metadata(success::DOCUMENT_PROCESSED.as_str()).is_none());
        assert!(get_error_metadata("W000").is_none());
    }
}
