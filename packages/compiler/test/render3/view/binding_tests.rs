//! Binding Tests
//!
//! Mirrors angular/packages/compiler/test/render3/view/binding_spec.ts

use angular_compiler::expression_parser::{
    AbsoluteSourceSpan, ImplicitReceiver, Interpolation, ParseSpan, PropertyRead, ThisReceiver, AST,
};
use angular_compiler::render3::r3_ast::{self as t, NodeId};
use angular_compiler::render3::view::t2_api::{
    BoundTarget, DirectiveMeta, ReferenceTarget, Target, TemplateEntity,
};
use angular_compiler::render3::view::t2_binder::R3TargetBinder;
use std::collections::HashMap;

/// Test directive metadata
#[derive(Debug, Clone, PartialEq)]
struct TestDirectiveMeta {
    name: String,
    export_as: Option<Vec<String>>,
    is_component: bool,
}

impl DirectiveMeta for TestDirectiveMeta {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_component(&self) -> bool {
        self.is_component
    }

    fn export_as(&self) -> Option<&[String]> {
        self.export_as.as_deref()
    }
}

fn span(start: usize, end: usize) -> (ParseSpan, AbsoluteSourceSpan) {
    (ParseSpan::new(0, end - start), AbsoluteSourceSpan::new(start, end))
}

fn implicit(at: usize) -> AST {
    let (span, source_span) = span(at, at);
    AST::ImplicitReceiver(ImplicitReceiver::new(span, source_span))
}

fn read(receiver: AST, name: &str, start: usize) -> AST {
    let (span, source_span) = span(start, start + name.len());
    AST::PropertyRead(PropertyRead::new(
        span,
        source_span,
        source_span,
        Box::new(receiver),
        name.to_string(),
    ))
}

fn interpolation(expressions: Vec<AST>, start: usize, end: usize) -> AST {
    let (span, source_span) = span(start, end);
    let strings = vec![String::new(); expressions.len() + 1];
    AST::Interpolation(Interpolation {
        span,
        source_span,
        strings,
        expressions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    mod t2_binding {
        use super::*;

        /// `<ng-template ngFor let-item [ngForOf]="items">{{item.name}}</ng-template>`
        fn ng_for_template(item_read: AST, items_read: AST) -> Vec<t::R3Node> {
            vec![t::R3Node::Template(t::Template {
                id: NodeId(1),
                tag_name: Some("ng-template".to_string()),
                attributes: vec![t::TextAttribute::new("ngFor".to_string(), String::new())],
                inputs: vec![t::BoundAttribute::new("ngForOf".to_string(), items_read)],
                template_attrs: vec![],
                children: vec![t::R3Node::BoundText(t::BoundText::new(interpolation(
                    vec![read(item_read, "name", 55)],
                    48,
                    62,
                )))],
                references: vec![],
                variables: vec![t::Variable {
                    id: NodeId(2),
                    name: "item".to_string(),
                    value: String::new(),
                }],
            })]
        }

        #[test]
        fn should_bind_a_simple_template() {
            let item = read(implicit(50), "item", 50);
            let items = read(implicit(40), "items", 40);
            let nodes = ng_for_template(item.clone(), items.clone());
            let res = R3TargetBinder::<TestDirectiveMeta>::new(HashMap::new())
                .bind(Target { template: nodes });

            assert_eq!(
                res.get_expression_target(&item),
                Some(TemplateEntity::Variable(NodeId(2)))
            );
            // `items` is a component property.
            assert_eq!(res.get_expression_target(&items), None);
            assert_eq!(res.target().len(), 1);
        }

        #[test]
        fn should_not_bind_reads_through_an_explicit_receiver() {
            let (span, source_span) = span(50, 54);
            let this_item = read(
                AST::ThisReceiver(ThisReceiver { span, source_span }),
                "item",
                55,
            );
            let items = read(implicit(40), "items", 40);
            let nodes = ng_for_template(this_item.clone(), items);
            let res = R3TargetBinder::<TestDirectiveMeta>::new(HashMap::new())
                .bind(Target { template: nodes });

            assert_eq!(res.get_expression_target(&this_item), None);
        }

        #[test]
        fn should_bind_references_from_a_nested_template() {
            let el_read = read(implicit(70), "el", 70);
            let nodes = vec![
                t::R3Node::Element(t::Element {
                    id: NodeId(1),
                    name: "input".to_string(),
                    attributes: vec![],
                    inputs: vec![],
                    children: vec![],
                    references: vec![t::Reference {
                        id: NodeId(2),
                        name: "el".to_string(),
                        value: String::new(),
                    }],
                }),
                t::R3Node::Template(t::Template {
                    id: NodeId(3),
                    tag_name: None,
                    attributes: vec![],
                    inputs: vec![],
                    template_attrs: vec![],
                    children: vec![t::R3Node::BoundText(t::BoundText::new(el_read.clone()))],
                    references: vec![],
                    variables: vec![],
                }),
            ];
            let res = R3TargetBinder::<TestDirectiveMeta>::new(HashMap::new())
                .bind(Target { template: nodes });

            assert_eq!(
                res.get_expression_target(&el_read),
                Some(TemplateEntity::Reference(NodeId(2)))
            );
            assert_eq!(
                res.get_reference_target(NodeId(2)),
                Some(ReferenceTarget::Element(NodeId(1)))
            );
        }

        #[test]
        fn should_bind_an_export_as_reference_to_its_directive() {
            let nodes = vec![t::R3Node::Element(t::Element {
                id: NodeId(1),
                name: "form".to_string(),
                attributes: vec![],
                inputs: vec![],
                children: vec![],
                references: vec![t::Reference {
                    id: NodeId(2),
                    name: "f".to_string(),
                    value: "ngForm".to_string(),
                }],
            })];
            let directive = TestDirectiveMeta {
                name: "NgForm".to_string(),
                export_as: Some(vec!["ngForm".to_string()]),
                is_component: false,
            };
            let mut directives = HashMap::new();
            directives.insert(NodeId(1), vec![directive.clone()]);
            let res = R3TargetBinder::new(directives).bind(Target { template: nodes });

            assert_eq!(
                res.get_reference_target(NodeId(2)),
                Some(ReferenceTarget::DirectiveOnNode {
                    directive: &directive,
                    node: NodeId(1),
                })
            );
        }
    }

    mod template_json {
        use super::*;

        #[test]
        fn should_read_a_template_from_json() {
            let json = r#"[
                {
                    "type": "Element",
                    "data": {
                        "id": 1,
                        "name": "div",
                        "attributes": [{ "name": "title", "value": "hello" }],
                        "references": [{ "id": 2, "name": "box" }],
                        "children": [
                            { "type": "Text", "data": { "value": "hi" } }
                        ]
                    }
                },
                {
                    "type": "Template",
                    "data": {
                        "id": 3,
                        "tag_name": null,
                        "variables": [{ "id": 4, "name": "row", "value": "index" }],
                        "template_attrs": [
                            { "type": "Text", "data": { "name": "ngIf", "value": "" } }
                        ]
                    }
                }
            ]"#;
            let nodes: Vec<t::R3Node> = serde_json::from_str(json).unwrap();

            assert_eq!(nodes.len(), 2);
            assert_eq!(nodes[0].id(), Some(NodeId(1)));
            match &nodes[0] {
                t::R3Node::Element(el) => {
                    assert_eq!(el.attributes[0].name, "title");
                    assert_eq!(el.references[0].value, "");
                    assert!(el.inputs.is_empty());
                }
                other => panic!("expected element, got {:?}", other),
            }
            match &nodes[1] {
                t::R3Node::Template(tmpl) => {
                    assert_eq!(tmpl.variables[0].value, "index");
                    assert_eq!(tmpl.template_attrs[0].name(), "ngIf");
                }
                other => panic!("expected template, got {:?}", other),
            }
        }
    }
}
