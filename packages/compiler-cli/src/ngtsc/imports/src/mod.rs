// Imports Source Module

pub mod emitter;
pub mod import_manager;
pub mod references;

// Re-exports
pub use emitter::{LocalReferenceEmitter, ReferenceEmitter};
pub use import_manager::ImportManager;
pub use references::{OwningModule, Reference};
