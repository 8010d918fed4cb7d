use std::collections::HashMap;

use angular_compiler::expression_parser::ast::{
    AbsoluteSourceSpan, ImplicitReceiver, Interpolation, LiteralPrimitive, ParseSpan, PropertyRead,
    AST,
};
use angular_compiler::render3::r3_ast::{
    BoundAttribute, BoundText, Element, NodeId, R3Node, Reference, Template, TemplateAttr, Text,
    TextAttribute, Variable,
};
use angular_compiler::render3::view::t2_api::Target;
use angular_compiler::render3::view::t2_binder::{R3BoundTarget, R3TargetBinder};

use crate::ngtsc::typecheck::api::TypeCheckableDirectiveMeta;

/// Builds template ASTs the way the template parser would: every node gets a
/// distinct `NodeId` and every expression a distinct source span.
#[derive(Debug, Default)]
pub struct TemplateBuilder {
    next_id: u32,
    offset: usize,
    directives: HashMap<NodeId, Vec<TypeCheckableDirectiveMeta>>,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn node_id(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId(self.next_id)
    }

    fn span(&mut self, len: usize) -> (ParseSpan, AbsoluteSourceSpan) {
        let start = self.offset;
        self.offset += len + 1;
        (ParseSpan::new(0, len), AbsoluteSourceSpan::new(start, start + len))
    }

    /// `name`, read off the implicit receiver.
    pub fn read(&mut self, name: &str) -> AST {
        let (span, source_span) = self.span(name.len());
        let receiver = ImplicitReceiver::new(
            ParseSpan::new(0, 0),
            AbsoluteSourceSpan::new(source_span.start, source_span.start),
        );
        AST::PropertyRead(PropertyRead::new(
            span,
            source_span,
            source_span,
            Box::new(AST::ImplicitReceiver(receiver)),
            name.to_string(),
        ))
    }

    /// A dotted path such as `user.address.city`.
    pub fn read_path(&mut self, path: &str) -> AST {
        let mut parts = path.split('.');
        let mut ast = self.read(parts.next().unwrap_or_default());
        for name in parts {
            let (span, source_span) = self.span(name.len());
            ast = AST::PropertyRead(PropertyRead::new(
                span,
                source_span,
                source_span,
                Box::new(ast),
                name.to_string(),
            ));
        }
        ast
    }

    pub fn string(&mut self, value: &str) -> AST {
        let (span, source_span) = self.span(value.len() + 2);
        AST::LiteralPrimitive(LiteralPrimitive::string(span, source_span, value.to_string()))
    }

    /// `{{ a }}{{ b }}` with empty surrounding strings.
    pub fn interpolation(&mut self, expressions: Vec<AST>) -> AST {
        let (span, source_span) = self.span(0);
        AST::Interpolation(Interpolation {
            span,
            source_span,
            strings: vec![String::new(); expressions.len() + 1],
            expressions,
        })
    }

    pub fn text(&self, value: &str) -> R3Node {
        R3Node::Text(Text::new(value.to_string()))
    }

    pub fn bound_text(&self, value: AST) -> R3Node {
        R3Node::BoundText(BoundText::new(value))
    }

    /// `let-name="value"`; an empty value reads `$implicit`.
    pub fn variable(&mut self, name: &str, value: &str) -> Variable {
        Variable {
            id: self.node_id(),
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// `#name` or `#name="value"`.
    pub fn reference(&mut self, name: &str, value: &str) -> Reference {
        Reference {
            id: self.node_id(),
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    pub fn element(&mut self, name: &str) -> ElementBuilder {
        ElementBuilder {
            element: Element {
                id: self.node_id(),
                name: name.to_string(),
                attributes: Vec::new(),
                inputs: Vec::new(),
                children: Vec::new(),
                references: Vec::new(),
            },
        }
    }

    /// An `<ng-template>`.
    pub fn template(&mut self) -> TemplateNodeBuilder {
        TemplateNodeBuilder {
            template: Template {
                id: self.node_id(),
                tag_name: Some("ng-template".to_string()),
                attributes: Vec::new(),
                inputs: Vec::new(),
                template_attrs: Vec::new(),
                children: Vec::new(),
                references: Vec::new(),
                variables: Vec::new(),
            },
        }
    }

    /// Attach `directive` to the element or template `node`, after any already attached.
    pub fn attach(&mut self, node: NodeId, directive: TypeCheckableDirectiveMeta) -> &mut Self {
        self.directives.entry(node).or_default().push(directive);
        self
    }

    /// Bind `nodes` against the attached directives.
    pub fn bind(&self, nodes: Vec<R3Node>) -> R3BoundTarget<TypeCheckableDirectiveMeta> {
        R3TargetBinder::new(self.directives.clone()).bind(Target { template: nodes })
    }
}

/// Builder for an element node.
#[derive(Debug)]
pub struct ElementBuilder {
    element: Element,
}

impl ElementBuilder {
    pub fn id(&self) -> NodeId {
        self.element.id
    }

    /// `[name]="value"`
    pub fn input(mut self, name: &str, value: AST) -> Self {
        self.element.inputs.push(BoundAttribute::new(name.to_string(), value));
        self
    }

    /// `name="value"`
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.element
            .attributes
            .push(TextAttribute::new(name.to_string(), value.to_string()));
        self
    }

    pub fn reference(mut self, reference: Reference) -> Self {
        self.element.references.push(reference);
        self
    }

    pub fn child(mut self, node: R3Node) -> Self {
        self.element.children.push(node);
        self
    }

    pub fn build(self) -> R3Node {
        R3Node::Element(self.element)
    }
}

/// Builder for a template node.
#[derive(Debug)]
pub struct TemplateNodeBuilder {
    template: Template,
}

impl TemplateNodeBuilder {
    pub fn id(&self) -> NodeId {
        self.template.id
    }

    /// The template came from a structural directive on `tag` (`<div *ngIf>`).
    pub fn desugared_from(mut self, tag: &str) -> Self {
        self.template.tag_name = Some(tag.to_string());
        self
    }

    /// `[name]="value"` on the `<ng-template>` itself.
    pub fn input(mut self, name: &str, value: AST) -> Self {
        self.template.inputs.push(BoundAttribute::new(name.to_string(), value));
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.template
            .attributes
            .push(TextAttribute::new(name.to_string(), value.to_string()));
        self
    }

    /// A bound attribute from the structural shorthand, e.g. `ngIf` in `*ngIf="cond"`.
    pub fn template_input(mut self, name: &str, value: AST) -> Self {
        self.template
            .template_attrs
            .push(TemplateAttr::Bound(BoundAttribute::new(name.to_string(), value)));
        self
    }

    pub fn template_attr(mut self, name: &str, value: &str) -> Self {
        self.template
            .template_attrs
            .push(TemplateAttr::Text(TextAttribute::new(name.to_string(), value.to_string())));
        self
    }

    pub fn variable(mut self, variable: Variable) -> Self {
        self.template.variables.push(variable);
        self
    }

    pub fn reference(mut self, reference: Reference) -> Self {
        self.template.references.push(reference);
        self
    }

    pub fn child(mut self, node: R3Node) -> Self {
        self.template.children.push(node);
        self
    }

    pub fn build(self) -> R3Node {
        R3Node::Template(self.template)
    }
}
