//! Render3 T2 Binder
//!
//! Corresponds to packages/compiler/src/render3/view/t2_binder.ts
//! Contains template binding logic: reference targets and lexical scoping of
//! template-local names

use std::collections::HashMap;

use crate::expression_parser::ast::{walk_ast, AbsoluteSourceSpan, AST};
use crate::render3::r3_ast::{self as t, NodeId, Template};

use super::t2_api::{BoundTarget, DirectiveMeta, ReferenceTarget, Target, TemplateEntity};

/// Processes `Target`s with a given set of directives and performs binding.
///
/// Directive matching is not performed here: the caller supplies which
/// directives apply to which element or template node.
pub struct R3TargetBinder<DirectiveT: DirectiveMeta + Clone> {
    directives_by_node: HashMap<NodeId, Vec<DirectiveT>>,
}

impl<DirectiveT: DirectiveMeta + Clone> R3TargetBinder<DirectiveT> {
    pub fn new(directives_by_node: HashMap<NodeId, Vec<DirectiveT>>) -> Self {
        R3TargetBinder { directives_by_node }
    }

    /// Perform a binding operation on the given `Target`.
    pub fn bind(&self, target: Target) -> R3BoundTarget<DirectiveT> {
        let mut references = HashMap::new();
        bind_references(&target.template, &self.directives_by_node, &mut references);

        let scope = Scope::apply(&target.template);
        let mut expressions = HashMap::new();
        let mut chain = vec![&scope];
        TemplateBinder::bind_nodes(&target.template, &mut chain, &mut expressions);

        R3BoundTarget {
            template: target.template,
            directives: self.directives_by_node.clone(),
            references,
            expressions,
        }
    }
}

/// Where a reference points, with directives stored by index into the node's list.
#[derive(Debug, Clone, Copy)]
enum RefTarget {
    Directive { node: NodeId, index: usize },
    Element(NodeId),
    Template(NodeId),
}

fn bind_references<D: DirectiveMeta>(
    nodes: &[t::R3Node],
    directives_by_node: &HashMap<NodeId, Vec<D>>,
    out: &mut HashMap<NodeId, RefTarget>,
) {
    for node in nodes {
        match node {
            t::R3Node::Element(el) => {
                for reference in &el.references {
                    let fallback = RefTarget::Element(el.id);
                    if let Some(target) =
                        resolve_reference(el.id, reference, fallback, directives_by_node)
                    {
                        out.insert(reference.id, target);
                    }
                }
                bind_references(&el.children, directives_by_node, out);
            }
            t::R3Node::Template(tmpl) => {
                for reference in &tmpl.references {
                    let fallback = RefTarget::Template(tmpl.id);
                    if let Some(target) =
                        resolve_reference(tmpl.id, reference, fallback, directives_by_node)
                    {
                        out.insert(reference.id, target);
                    }
                }
                bind_references(&tmpl.children, directives_by_node, out);
            }
            t::R3Node::Text(_) | t::R3Node::BoundText(_) => {}
        }
    }
}

fn resolve_reference<D: DirectiveMeta>(
    node: NodeId,
    reference: &t::Reference,
    fallback: RefTarget,
    directives_by_node: &HashMap<NodeId, Vec<D>>,
) -> Option<RefTarget> {
    let directives = directives_by_node
        .get(&node)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    let value = reference.value.trim();

    if value.is_empty() {
        // `#ref` names the component on the node, or the node itself.
        return Some(
            directives
                .iter()
                .position(|dir| dir.is_component())
                .map(|index| RefTarget::Directive { node, index })
                .unwrap_or(fallback),
        );
    }

    // `#ref="exportAs"` must name a directive; anything else stays unbound.
    directives
        .iter()
        .position(|dir| {
            dir.export_as()
                .map(|names| names.iter().any(|name| name == value))
                .unwrap_or(false)
        })
        .map(|index| RefTarget::Directive { node, index })
}

/// Represents a binding scope within a template.
#[derive(Debug, Default)]
pub struct Scope {
    /// Named members of the `Scope`, such as `Reference`s or `Variable`s.
    pub named_entities: HashMap<String, TemplateEntity>,
    /// Child `Scope`s for immediately nested templates.
    pub child_scopes: HashMap<NodeId, Scope>,
}

impl Scope {
    /// Process a template and construct its root `Scope`.
    pub fn apply(nodes: &[t::R3Node]) -> Self {
        let mut scope = Scope::default();
        scope.ingest_nodes(nodes);
        scope
    }

    fn for_template(template: &Template) -> Self {
        let mut scope = Scope::default();
        // Variables are declared before anything the template body declares.
        for variable in &template.variables {
            scope.maybe_declare(&variable.name, TemplateEntity::Variable(variable.id));
        }
        scope.ingest_nodes(&template.children);
        scope
    }

    fn ingest_nodes(&mut self, nodes: &[t::R3Node]) {
        for node in nodes {
            match node {
                t::R3Node::Element(el) => {
                    for reference in &el.references {
                        self.maybe_declare(&reference.name, TemplateEntity::Reference(reference.id));
                    }
                    self.ingest_nodes(&el.children);
                }
                t::R3Node::Template(tmpl) => {
                    // References on a template belong to the outer scope, its variables to the inner one.
                    for reference in &tmpl.references {
                        self.maybe_declare(&reference.name, TemplateEntity::Reference(reference.id));
                    }
                    self.child_scopes.insert(tmpl.id, Scope::for_template(tmpl));
                }
                t::R3Node::Text(_) | t::R3Node::BoundText(_) => {}
            }
        }
    }

    fn maybe_declare(&mut self, name: &str, entity: TemplateEntity) {
        if !self.named_entities.contains_key(name) {
            self.named_entities.insert(name.to_string(), entity);
        }
    }

    /// Get the child scope for a nested template.
    pub fn get_child_scope(&self, template: NodeId) -> Option<&Scope> {
        self.child_scopes.get(&template)
    }
}

/// Resolves the read expressions of a template against a chain of scopes.
struct TemplateBinder;

impl TemplateBinder {
    fn bind_nodes<'s>(
        nodes: &'s [t::R3Node],
        chain: &mut Vec<&'s Scope>,
        expressions: &mut HashMap<AbsoluteSourceSpan, TemplateEntity>,
    ) {
        for node in nodes {
            match node {
                t::R3Node::Element(el) => {
                    for input in &el.inputs {
                        Self::bind_expression(&input.value, chain, expressions);
                    }
                    Self::bind_nodes(&el.children, chain, expressions);
                }
                t::R3Node::Template(tmpl) => {
                    // Bindings on the template itself are evaluated in the outer scope.
                    for input in &tmpl.inputs {
                        Self::bind_expression(&input.value, chain, expressions);
                    }
                    for attr in &tmpl.template_attrs {
                        if let t::TemplateAttr::Bound(bound) = attr {
                            Self::bind_expression(&bound.value, chain, expressions);
                        }
                    }
                    let child = chain
                        .last()
                        .and_then(|scope| scope.get_child_scope(tmpl.id));
                    if let Some(child) = child {
                        chain.push(child);
                        Self::bind_nodes(&tmpl.children, chain, expressions);
                        chain.pop();
                    }
                }
                t::R3Node::BoundText(text) => {
                    Self::bind_expression(&text.value, chain, expressions);
                }
                t::R3Node::Text(_) => {}
            }
        }
    }

    fn bind_expression(
        ast: &AST,
        chain: &[&Scope],
        expressions: &mut HashMap<AbsoluteSourceSpan, TemplateEntity>,
    ) {
        walk_ast(ast, &mut |node| {
            if let AST::PropertyRead(read) = node {
                if read.receiver.is_implicit_receiver() {
                    let entity = chain
                        .iter()
                        .rev()
                        .find_map(|scope| scope.named_entities.get(&read.name));
                    if let Some(entity) = entity {
                        expressions.insert(read.source_span, *entity);
                    }
                }
            }
        });
    }
}

/// Metadata container for a `Target` that allows queries for specific bits of metadata.
#[derive(Debug)]
pub struct R3BoundTarget<DirectiveT: DirectiveMeta + Clone> {
    template: Vec<t::R3Node>,
    directives: HashMap<NodeId, Vec<DirectiveT>>,
    references: HashMap<NodeId, RefTarget>,
    expressions: HashMap<AbsoluteSourceSpan, TemplateEntity>,
}

impl<DirectiveT: DirectiveMeta + Clone> BoundTarget<DirectiveT> for R3BoundTarget<DirectiveT> {
    fn target(&self) -> &[t::R3Node] {
        &self.template
    }

    fn get_directives_of_node(&self, node: NodeId) -> Option<&[DirectiveT]> {
        self.directives.get(&node).map(Vec::as_slice)
    }

    fn get_reference_target(&self, reference: NodeId) -> Option<ReferenceTarget<&DirectiveT>> {
        match *self.references.get(&reference)? {
            RefTarget::Directive { node, index } => {
                let directive = self.directives.get(&node)?.get(index)?;
                Some(ReferenceTarget::DirectiveOnNode { directive, node })
            }
            RefTarget::Element(node) => Some(ReferenceTarget::Element(node)),
            RefTarget::Template(node) => Some(ReferenceTarget::Template(node)),
        }
    }

    fn get_expression_target(&self, expr: &AST) -> Option<TemplateEntity> {
        match expr {
            AST::PropertyRead(read) => self.expressions.get(&read.source_span).copied(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression_parser::ast::{ImplicitReceiver, ParseSpan, PropertyRead};
    use crate::render3::r3_ast::{BoundAttribute, BoundText, Element, Reference, Variable};

    #[derive(Debug, Clone, PartialEq)]
    struct Dir {
        name: String,
        export_as: Option<Vec<String>>,
        component: bool,
    }

    impl DirectiveMeta for Dir {
        fn name(&self) -> &str {
            &self.name
        }

        fn is_component(&self) -> bool {
            self.component
        }

        fn export_as(&self) -> Option<&[String]> {
            self.export_as.as_deref()
        }
    }

    fn dir(name: &str, export_as: &[&str], component: bool) -> Dir {
        Dir {
            name: name.to_string(),
            export_as: if export_as.is_empty() {
                None
            } else {
                Some(export_as.iter().map(|s| s.to_string()).collect())
            },
            component,
        }
    }

    fn read(name: &str, at: usize) -> AST {
        let span = AbsoluteSourceSpan::new(at, at + name.len());
        AST::PropertyRead(PropertyRead::new(
            ParseSpan::new(0, name.len()),
            span,
            span,
            Box::new(AST::ImplicitReceiver(ImplicitReceiver::new(
                ParseSpan::new(0, 0),
                AbsoluteSourceSpan::new(at, at),
            ))),
            name.to_string(),
        ))
    }

    fn element(id: u32, children: Vec<t::R3Node>, references: Vec<Reference>) -> t::R3Node {
        t::R3Node::Element(Element {
            id: NodeId(id),
            name: "div".to_string(),
            attributes: vec![],
            inputs: vec![],
            children,
            references,
        })
    }

    fn template(id: u32, variables: Vec<Variable>, children: Vec<t::R3Node>) -> t::R3Node {
        t::R3Node::Template(Template {
            id: NodeId(id),
            tag_name: Some("ng-template".to_string()),
            attributes: vec![],
            inputs: vec![],
            template_attrs: vec![],
            children,
            references: vec![],
            variables,
        })
    }

    fn reference(id: u32, name: &str, value: &str) -> Reference {
        Reference {
            id: NodeId(id),
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    fn variable(id: u32, name: &str) -> Variable {
        Variable {
            id: NodeId(id),
            name: name.to_string(),
            value: String::new(),
        }
    }

    fn bound_text(ast: AST) -> t::R3Node {
        t::R3Node::BoundText(BoundText::new(ast))
    }

    #[test]
    fn should_bind_template_variables_inside_their_template() {
        let inner = read("item", 10);
        let outer = read("item", 20);
        let nodes = vec![
            template(1, vec![variable(2, "item")], vec![bound_text(inner.clone())]),
            bound_text(outer.clone()),
        ];
        let bound = R3TargetBinder::<Dir>::new(HashMap::new()).bind(Target { template: nodes });

        assert_eq!(
            bound.get_expression_target(&inner),
            Some(TemplateEntity::Variable(NodeId(2)))
        );
        assert_eq!(bound.get_expression_target(&outer), None);
    }

    #[test]
    fn should_let_inner_declarations_shadow_outer_ones() {
        let inner = read("x", 10);
        let nodes = vec![
            element(1, vec![], vec![reference(2, "x", "")]),
            template(3, vec![variable(4, "x")], vec![bound_text(inner.clone())]),
        ];
        let bound = R3TargetBinder::<Dir>::new(HashMap::new()).bind(Target { template: nodes });

        assert_eq!(
            bound.get_expression_target(&inner),
            Some(TemplateEntity::Variable(NodeId(4)))
        );
    }

    #[test]
    fn should_make_references_visible_before_their_declaration() {
        let early = read("el", 0);
        let nodes = vec![
            bound_text(early.clone()),
            element(1, vec![], vec![reference(2, "el", "")]),
        ];
        let bound = R3TargetBinder::<Dir>::new(HashMap::new()).bind(Target { template: nodes });

        assert_eq!(
            bound.get_expression_target(&early),
            Some(TemplateEntity::Reference(NodeId(2)))
        );
    }

    #[test]
    fn should_evaluate_template_bindings_in_the_outer_scope() {
        let binding = read("item", 5);
        let nodes = vec![t::R3Node::Template(Template {
            id: NodeId(1),
            tag_name: None,
            attributes: vec![],
            inputs: vec![BoundAttribute::new("ngIf".to_string(), binding.clone())],
            template_attrs: vec![],
            children: vec![],
            references: vec![],
            variables: vec![variable(2, "item")],
        })];
        let bound = R3TargetBinder::<Dir>::new(HashMap::new()).bind(Target { template: nodes });

        assert_eq!(bound.get_expression_target(&binding), None);
    }

    #[test]
    fn should_resolve_reference_targets() {
        let nodes = vec![
            element(1, vec![], vec![reference(2, "plain", "")]),
            element(
                3,
                vec![],
                vec![reference(4, "cmp", ""), reference(5, "form", "ngForm"), reference(6, "bad", "nope")],
            ),
            template(7, vec![], vec![]),
        ];
        let mut directives = HashMap::new();
        directives.insert(NodeId(3), vec![dir("FormDir", &["ngForm"], false), dir("Cmp", &[], true)]);
        let bound = R3TargetBinder::new(directives).bind(Target { template: nodes });

        assert_eq!(
            bound.get_reference_target(NodeId(2)),
            Some(ReferenceTarget::Element(NodeId(1)))
        );
        match bound.get_reference_target(NodeId(4)) {
            Some(ReferenceTarget::DirectiveOnNode { directive, node }) => {
                assert_eq!(directive.name(), "Cmp");
                assert_eq!(node, NodeId(3));
            }
            other => panic!("unexpected target {:?}", other),
        }
        match bound.get_reference_target(NodeId(5)) {
            Some(ReferenceTarget::DirectiveOnNode { directive, .. }) => {
                assert_eq!(directive.name(), "FormDir")
            }
            other => panic!("unexpected target {:?}", other),
        }
        assert!(bound.get_reference_target(NodeId(6)).is_none());
        assert_eq!(bound.get_directives_of_node(NodeId(3)).map(|d| d.len()), Some(2));
        assert!(bound.get_directives_of_node(NodeId(7)).is_none());
    }
}
