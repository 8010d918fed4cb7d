// Console Logger
//
// Logger that writes to stderr, leaving stdout to the generated shim text.

use super::logger::{LogLevel, Logger};

/// Console logger.
#[derive(Debug)]
pub struct ConsoleLogger {
    level: LogLevel,
    prefix: Option<String>,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            prefix: None,
        }
    }

    /// Tag every line with `prefix`, e.g. the tool name.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn format(&self, level: LogLevel, msg: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}: [{}] {}", prefix, level.label(), msg),
            None => format!("[{}] {}", level.label(), msg),
        }
    }
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, level: LogLevel, msg: &str) {
        eprintln!("{}", self.format(level, msg));
    }
}
