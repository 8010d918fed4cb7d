// TypeCheck API Module

pub mod api;

// Re-exports
pub use api::{
    ComponentTypeCheckMeta, ConfigError, TcbError, TypeCheckableDirectiveMeta, TypeCheckingConfig,
};
