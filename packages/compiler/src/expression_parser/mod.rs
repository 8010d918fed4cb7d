/**
 * Expression Parser Module
 *
 * Corresponds to packages/compiler/src/expression_parser/
 * Only the expression AST is provided; expressions arrive already parsed.
 */
pub mod ast;

pub use ast::*;
