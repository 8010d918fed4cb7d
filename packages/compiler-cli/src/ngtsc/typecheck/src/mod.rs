// TypeCheck Source Module

pub mod context;
pub mod expression;
pub mod input;
pub mod ops;
pub mod scope;
pub mod type_check_block;

// Re-exports
pub use context::TypeCheckingContext;
pub use expression::{ExpressionTranslator, ResolveFn, TcbExpressionTranslator};
pub use input::{NodeDirectives, TypeCheckInput};
pub use ops::{DirectiveHost, TcbOp};
pub use scope::{OpSlot, Scope, ScopeId};
pub use type_check_block::{Context, TypeCheckBlockGenerator};
