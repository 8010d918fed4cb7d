//! Import handling for generated code
//!
//! Corresponds to packages/compiler-cli/src/ngtsc/imports

pub mod src;

#[cfg(test)]
mod test;

pub use src::*;
