//! Angular TypeScript Compiler (ngtsc)
//!
//! Corresponds to packages/compiler-cli/src/ngtsc
//! Only the pieces template type-checking needs are carried here.

pub mod imports;
pub mod logging;
pub mod typecheck;
