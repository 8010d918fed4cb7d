//! Reference emission
//!
//! Turns a `Reference` into host-language code that names it at the emit site.
//!
//! Matches: angular/packages/compiler-cli/src/ngtsc/imports/src/emitter.ts

use ts::{Expression, TypeNode};

use super::references::Reference;

/// Generates expressions which refer to References in a given context.
///
/// Emitting may register an import as a side effect, hence `&mut self`.
pub trait ReferenceEmitter {
    /// Emit a value expression which refers to the given Reference.
    fn reference_expression(&mut self, reference: &Reference) -> Expression;

    /// Emit a type which refers to the given Reference, with type arguments.
    fn reference_type(&mut self, reference: &Reference, type_arguments: Vec<TypeNode>) -> TypeNode {
        TypeNode::reference(self.reference_expression(reference), type_arguments)
    }
}

/// Emitter that names every reference by its bare identifier and never imports.
///
/// Suitable when all referenced declarations are in scope of the emitted code.
#[derive(Debug, Default)]
pub struct LocalReferenceEmitter;

impl LocalReferenceEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl ReferenceEmitter for LocalReferenceEmitter {
    fn reference_expression(&mut self, reference: &Reference) -> Expression {
        Expression::identifier(reference.debug_name())
    }
}
