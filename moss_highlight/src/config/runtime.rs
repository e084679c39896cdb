// RUNTIME PREFERENCES (User Experience)

use super::constants::env as env_keys;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;

/// How the scanner looks for the end of a `/* ... */` comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockCommentScan {
    /// Stop at the first contiguous `*/`
    #[default]
    Contiguous,
    /// Reproduce the historical page script: stop as soon as the current
    /// character is `*` or the next one is `/`, then skip two characters
    /// whatever they are.
    Legacy,
}

impl BlockCommentScan {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Contiguous => "contiguous",
            Self::Legacy => "legacy",
        }
    }
}

impl fmt::Display for BlockCommentScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown block comment scan mode '{value}' (expected 'contiguous' or 'legacy')")]
pub struct ParseScanModeError {
    pub value: String,
}

impl FromStr for BlockCommentScan {
    type Err = ParseScanModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contiguous" => Ok(Self::Contiguous),
            "legacy" => Ok(Self::Legacy),
            _ => Err(ParseScanModeError {
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightPreferences {
    /// Block comment termination strategy
    pub block_comment_scan: BlockCommentScan,

    /// Whether the stateful highlighter keeps per-category token counts
    pub collect_metrics: bool,
}

impl Default for HighlightPreferences {
    fn default() -> Self {
        Self {
            block_comment_scan: BlockCommentScan::Contiguous,
            collect_metrics: true,
        }
    }
}

impl HighlightPreferences {
    /// Defaults overridden by `MOSS_*` environment variables. Unparsable
    /// values are ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            block_comment_scan: env::var(env_keys::BLOCK_COMMENT_SCAN)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.block_comment_scan),
            collect_metrics: env::var(env_keys::COLLECT_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.collect_metrics),
        }
    }

    pub fn with_block_comment_scan(mut self, scan: BlockCommentScan) -> Self {
        self.block_comment_scan = scan;
        self
    }
}
