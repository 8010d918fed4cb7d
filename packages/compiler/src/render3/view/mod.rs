//! Render3 View Module
//!
//! Corresponds to packages/compiler/src/render3/view/
//! Binder API and the default binder implementation

pub mod t2_api;
pub mod t2_binder;

// Re-exports
pub use t2_api::*;
pub use t2_binder::*;
