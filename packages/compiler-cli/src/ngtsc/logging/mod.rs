//! Logging
//!
//! Corresponds to packages/compiler-cli/src/ngtsc/logging

pub mod src;

#[cfg(test)]
mod test;

pub use src::console_logger::ConsoleLogger;
pub use src::logger::{LogLevel, Logger, MemoryLogger, NullLogger};
