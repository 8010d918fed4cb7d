//! TypeScript-compatible syntax for code emitted by the Angular compiler.
//!
//! The type-check block generator builds its output with the node types in
//! [`node`] (a small mirror of the `ts.factory` surface it needs) and turns
//! them into source text with [`printer`].

pub mod node;
pub mod printer;

pub use node::*;
pub use printer::{is_identifier_name, print_statements, Printer};
