//! Render3 T2 API
//!
//! Corresponds to packages/compiler/src/render3/view/t2_api.ts
//! Contains type definitions for t2 binder/analysis APIs

use crate::expression_parser::ast::AST;
use crate::render3::r3_ast::{NodeId, R3Node};

/// Possible values that a reference can be resolved to.
#[derive(Debug, Clone, PartialEq)]
pub enum ReferenceTarget<DirectiveT> {
    /// The reference names a directive instance living on `node`.
    DirectiveOnNode { directive: DirectiveT, node: NodeId },
    /// The reference names a plain element.
    Element(NodeId),
    /// The reference names an `<ng-template>`.
    Template(NodeId),
}

/// Entity that is local to the template and defined within the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateEntity {
    Reference(NodeId),
    Variable(NodeId),
}

/// Metadata regarding a directive that's needed by the binder.
pub trait DirectiveMeta {
    /// Name of the directive class (used for debugging).
    fn name(&self) -> &str;
    /// Whether the directive is a component.
    fn is_component(&self) -> bool;
    /// Names under which the directive is exported, if any.
    fn export_as(&self) -> Option<&[String]>;
}

/// A template together with the directive table it was bound against.
#[derive(Debug, Clone)]
pub struct Target {
    pub template: Vec<R3Node>,
}

/// Result of performing the binding operation against a `Target`.
pub trait BoundTarget<DirectiveT: DirectiveMeta> {
    /// The template nodes that were bound.
    fn target(&self) -> &[R3Node];

    /// For a given element or template node, get the set of directives which matched the node.
    fn get_directives_of_node(&self, node: NodeId) -> Option<&[DirectiveT]>;

    /// For a given `Reference` node, get the reference's target.
    fn get_reference_target(&self, reference: NodeId) -> Option<ReferenceTarget<&DirectiveT>>;

    /// For a given read expression, get the template-local entity it refers to.
    ///
    /// `None` means the read goes to the component instance.
    fn get_expression_target(&self, expr: &AST) -> Option<TemplateEntity>;
}
