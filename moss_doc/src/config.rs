//! TOML configuration for document processing
//!
//! Every section and key is optional; missing keys take the defaults below.
//!
//! ```toml
//! [highlight]
//! block_comment_scan = "contiguous"
//!
//! [toc]
//! ordered = false
//! heading_tag = "h3"
//! target_id = "toc"
//! date_color = "#90908a"
//! require_target = false
//!
//! [files]
//! extensions = ["html", "htm"]
//! max_file_size = 10485760
//!
//! [batch]
//! recursive = true
//! fail_fast = false
//! ```

use moss_highlight::logging::{codes, Code};
use moss_highlight::HighlightPreferences;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_HEADING_TAG: &str = "h3";
pub const DEFAULT_TARGET_ID: &str = "toc";
pub const DEFAULT_DATE_COLOR: &str = "#90908a";
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {message}")]
    Unreadable { path: String, message: String },

    #[error("Invalid config file {path}: {message}")]
    Invalid { path: String, message: String },
}

impl ConfigError {
    pub fn error_code(&self) -> Code {
        match self {
            ConfigError::Unreadable { .. } => codes::config::CONFIG_UNREADABLE,
            ConfigError::Invalid { .. } => codes::config::CONFIG_INVALID,
        }
    }
}

/// Table-of-contents settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TocConfig {
    /// `<ol>` instead of `<ul>`
    pub ordered: bool,
    /// Tag name of the dated headings
    pub heading_tag: String,
    /// `id` of the element that receives the list
    pub target_id: String,
    /// Colour of the `[YYYY-MM-DD]` prefix
    pub date_color: String,
    /// Fail a page that has headings but no target element
    pub require_target: bool,
}

impl Default for TocConfig {
    fn default() -> Self {
        Self {
            ordered: false,
            heading_tag: DEFAULT_HEADING_TAG.to_string(),
            target_id: DEFAULT_TARGET_ID.to_string(),
            date_color: DEFAULT_DATE_COLOR.to_string(),
            require_target: false,
        }
    }
}

/// Which files are picked up and how large they may be
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLimits {
    /// Lowercase extensions without the dot
    pub extensions: Vec<String>,
    pub max_file_size: u64,
}

impl Default for FileLimits {
    fn default() -> Self {
        Self {
            extensions: vec!["html".to_string(), "htm".to_string()],
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl FileLimits {
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    pub recursive: bool,
    /// Worker threads; unset means one per CPU
    pub max_threads: Option<usize>,
    pub fail_fast: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            recursive: true,
            max_threads: None,
            fail_fast: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocConfig {
    pub highlight: HighlightPreferences,
    pub toc: TocConfig,
    pub files: FileLimits,
    pub batch: BatchSettings,
}

impl DocConfig {
    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Unreadable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text).map_err(|e| match e {
            ConfigError::Invalid { message, .. } => ConfigError::Invalid {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|e| ConfigError::Invalid {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Defaults with `[highlight]` taken from the `MOSS_*` environment
    pub fn from_env() -> Self {
        Self {
            highlight: HighlightPreferences::from_env(),
            ..Self::default()
        }
    }

    /// Render as TOML, e.g. to show the effective configuration
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Invalid {
            path: "<effective>".to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use moss_highlight::BlockCommentScan;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = DocConfig::from_toml_str("").unwrap();
        assert_eq!(config, DocConfig::default());
        assert_eq!(config.toc.heading_tag, "h3");
        assert_eq!(config.toc.target_id, "toc");
        assert!(config.batch.recursive);
        assert!(config.batch.max_threads.is_none());
    }

    #[test]
    fn test_partial_sections() {
        let config = DocConfig::from_toml_str(
            r#"
            [highlight]
            block_comment_scan = "legacy"

            [toc]
            ordered = true

            [files]
            max_file_size = 1024
            "#,
        )
        .unwrap();

        assert_eq!(config.highlight.block_comment_scan, BlockCommentScan::Legacy);
        assert!(config.highlight.collect_metrics);
        assert!(config.toc.ordered);
        assert_eq!(config.toc.date_color, DEFAULT_DATE_COLOR);
        assert_eq!(config.files.max_file_size, 1024);
        assert_eq!(config.files.extensions, vec!["html", "htm"]);
    }

    #[test]
    fn test_invalid_toml_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("moss.toml");
        fs::write(&path, "[toc]\nordered = \"yes\"\n").unwrap();

        let err = DocConfig::load(&path).unwrap_err();
        assert_matches!(&err, ConfigError::Invalid { path: p, .. } if p.ends_with("moss.toml"));
        assert_eq!(err.error_code(), codes::config::CONFIG_INVALID);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = DocConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert_matches!(err, ConfigError::Unreadable { .. });
    }

    #[test]
    fn test_effective_config_round_trips() {
        let mut config = DocConfig::default();
        config.toc.ordered = true;
        config.batch.max_threads = Some(3);
        let text = config.to_toml_string().unwrap();
        assert_eq!(DocConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_extension_filter() {
        let limits = FileLimits::default();
        assert!(limits.accepts(Path::new("post.HTML")));
        assert!(limits.accepts(Path::new("a/b/index.htm")));
        assert!(!limits.accepts(Path::new("notes.txt")));
        assert!(!limits.accepts(Path::new("Makefile")));
    }
}
