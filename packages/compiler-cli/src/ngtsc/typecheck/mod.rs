//! Template Type-Checking
//!
//! Corresponds to packages/compiler-cli/src/ngtsc/typecheck

pub mod api;
pub mod src;
pub mod testing;

#[cfg(test)]
mod test;

pub use api::*;
pub use src::*;
