// Logger Interface
//
// Logger trait definition and the in-process loggers.

use std::sync::Mutex;

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Logger trait.
///
/// Loggers are shared by shim files finalized in parallel.
pub trait Logger: Send + Sync {
    fn level(&self) -> LogLevel;

    /// Write one message; only called for enabled levels.
    fn write(&self, level: LogLevel, msg: &str);

    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    fn log(&self, level: LogLevel, msg: &str) {
        if self.is_enabled(level) {
            self.write(level, msg);
        }
    }

    fn debug(&self, msg: &str) {
        self.log(LogLevel::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.log(LogLevel::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.log(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.log(LogLevel::Error, msg);
    }
}

/// Null logger (logs nothing).
#[derive(Debug, Default)]
pub struct NullLogger;

impl NullLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NullLogger {
    fn level(&self) -> LogLevel {
        LogLevel::Error
    }

    fn is_enabled(&self, _level: LogLevel) -> bool {
        false
    }

    fn write(&self, _level: LogLevel, _msg: &str) {}
}

/// Logger that keeps every enabled message in memory.
#[derive(Debug)]
pub struct MemoryLogger {
    level: LogLevel,
    messages: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLogger {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Messages logged so far, oldest first.
    pub fn messages(&self) -> Vec<(LogLevel, String)> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Logger for MemoryLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, level: LogLevel, msg: &str) {
        let mut messages = match self.messages.lock() {
            Ok(messages) => messages,
            Err(poisoned) => poisoned.into_inner(),
        };
        messages.push((level, msg.to_string()));
    }
}
