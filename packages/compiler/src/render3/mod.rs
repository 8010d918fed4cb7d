//! Render3 Module
//!
//! Corresponds to packages/compiler/src/render3/
//! Template AST and the binding APIs built on top of it

pub mod r3_ast;
pub mod view;
