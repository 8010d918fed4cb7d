#![deny(clippy::all)]

/**
 * Angular Compiler CLI - Rust Implementation
 *
 * Template type-check block generation and the `ngtcb` tool
 */
// Re-export compiler for convenience
pub use angular_compiler as compiler;

pub mod ngtsc;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
