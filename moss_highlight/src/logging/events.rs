//! Event type shared by the logging macros and the error collector

use super::codes::Code;
use std::fmt;
use std::time::SystemTime;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Level used when the event is handed to the `log` facade
    pub fn to_log_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warning => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
        }
    }
}

/// Core log event structure
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: SystemTime,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    /// Key/value context in insertion order
    pub context: Vec<(String, String)>,
}

impl LogEvent {
    fn with_level(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: SystemTime::now(),
            level,
            code,
            message: message.to_string(),
            context: Vec::new(),
        }
    }

    pub fn error(error_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Error, error_code, message)
    }

    /// Warnings may not have codes
    pub fn warning(message: &str) -> Self {
        Self::with_level(LogLevel::Warning, Code::new("W000"), message)
    }

    pub fn coded_warning(warning_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Warning, warning_code, message)
    }

    pub fn info(message: &str) -> Self {
        Self::with_level(LogLevel::Info, Code::new("I000"), message)
    }

    /// Info event carrying a success code
    pub fn success(success_code: Code, message: &str) -> Self {
        Self::with_level(LogLevel::Info, success_code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::with_level(LogLevel::Debug, Code::new("D000"), message)
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }

    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }
}

impl fmt::Display for LogEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        for (key, value) in &self.context {
            write!(f, " {}={}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_event_display_keeps_context_order() {
        let event = LogEvent::error(codes::toc::MISSING_DATE, "Heading has no date")
            .with_context("heading", "3")
            .with_context("file", "index.html");

        assert_eq!(
            event.to_string(),
            "[T001] Heading has no date heading=3 file=index.html"
        );
        assert_eq!(event.context_value("file"), Some("index.html"));
        assert!(event.is_error());
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::Warning.to_log_level(), log::Level::Warn);
        assert_eq!(LogLevel::Debug.as_str(), "DEBUG");
        assert!(LogLevel::Error < LogLevel::Debug);
    }
}
