//! Reading and writing page files with size and encoding checks

use crate::config::FileLimits;
use moss_highlight::logging::{codes, Code};
use moss_highlight::{log_debug, log_error, log_success};
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Not a regular file: {path}")]
    NotAFile { path: String },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading {path}: {message}")]
    IoError { path: String, message: String },

    #[error("Cannot write {path}: {message}")]
    WriteFailed { path: String, message: String },
}

impl FileProcessorError {
    /// Get the appropriate error code for this error type
    pub fn error_code(&self) -> Code {
        match self {
            FileProcessorError::FileNotFound { .. } | FileProcessorError::NotAFile { .. } => {
                codes::file_processing::FILE_NOT_FOUND
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
            FileProcessorError::WriteFailed { .. } => codes::file_processing::WRITE_FAILED,
        }
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileMetadata {
    pub path: PathBuf,
    pub size: u64,
    /// Lowercased, without the dot
    pub extension: Option<String>,
    pub line_count: usize,
    #[serde(skip)]
    pub modified: Option<SystemTime>,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
        let mut size = self.size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", self.size, UNITS[unit_index])
        } else {
            format!("{:.2} {}", size, UNITS[unit_index])
        }
    }
}

/// A page read into memory
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub source: String,
    pub metadata: FileMetadata,
    pub read_duration: Duration,
}

/// Read `path` as UTF-8, rejecting files above `limits.max_file_size`
pub fn process_file(path: &Path, limits: &FileLimits) -> Result<LoadedFile, FileProcessorError> {
    let start_time = Instant::now();
    let path_str = path.display().to_string();

    log_debug!("Starting file processing", "file" => path_str);

    let meta = fs::metadata(path).map_err(|e| {
        let error = match e.kind() {
            ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path: path_str.clone(),
            },
            _ => FileProcessorError::IoError {
                path: path_str.clone(),
                message: e.to_string(),
            },
        };
        log_error!(error.error_code(), "Cannot read file metadata", "file" => path_str, "io_error" => e);
        error
    })?;

    if !meta.is_file() {
        let error = FileProcessorError::NotAFile {
            path: path_str.clone(),
        };
        log_error!(error.error_code(), "Path is not a file", "file" => path_str);
        return Err(error);
    }

    if meta.len() > limits.max_file_size {
        let error = FileProcessorError::FileTooLarge {
            size: meta.len(),
            max_size: limits.max_file_size,
        };
        log_error!(error.error_code(), "File exceeds maximum size",
            "file" => path_str,
            "size_bytes" => meta.len(),
            "limit_bytes" => limits.max_file_size
        );
        return Err(error);
    }

    let bytes = fs::read(path).map_err(|e| {
        let error = FileProcessorError::IoError {
            path: path_str.clone(),
            message: e.to_string(),
        };
        log_error!(error.error_code(), "Failed to read file", "file" => path_str, "io_error" => e);
        error
    })?;

    let source = String::from_utf8(bytes).map_err(|e| {
        let error = FileProcessorError::InvalidEncoding {
            path: path_str.clone(),
        };
        log_error!(error.error_code(), "File is not valid UTF-8",
            "file" => path_str,
            "valid_up_to" => e.utf8_error().valid_up_to()
        );
        error
    })?;

    let metadata = FileMetadata {
        path: path.to_path_buf(),
        size: meta.len(),
        extension: path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase()),
        line_count: source.lines().count(),
        modified: meta.modified().ok(),
    };

    let loaded = LoadedFile {
        source,
        metadata,
        read_duration: start_time.elapsed(),
    };

    log_debug!("File read",
        "file" => path_str,
        "size" => loaded.metadata.human_readable_size(),
        "lines" => loaded.metadata.line_count,
        "duration_ms" => format!("{:.2}", loaded.read_duration.as_secs_f64() * 1000.0)
    );

    Ok(loaded)
}

/// Write `contents` to `path`, creating missing parent directories
pub fn write_file(path: &Path, contents: &str) -> Result<(), FileProcessorError> {
    let path_str = path.display().to_string();
    let write_failed = |e: std::io::Error| {
        let error = FileProcessorError::WriteFailed {
            path: path_str.clone(),
            message: e.to_string(),
        };
        log_error!(error.error_code(), "Failed to write output", "file" => path_str, "io_error" => e);
        error
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }
    fs::write(path, contents).map_err(write_failed)?;

    log_success!(codes::success::FILE_WRITTEN, "Output written",
        "file" => path_str,
        "bytes" => contents.len()
    );
    Ok(())
}
