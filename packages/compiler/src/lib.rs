#![deny(clippy::all)]

/**
 * Angular Rust Compiler
 *
 * Template-side building blocks shared by the compiler CLI: the binding
 * expression AST, the Render3 template AST and the template binder.
 */

// Parser modules (mirrors Angular structure)
pub mod expression_parser;

// Compilation modules
pub mod render3;

pub use render3::r3_ast::NodeId;
