// Logging Source Module

pub mod console_logger;
pub mod logger;
