//! Render3 AST
//!
//! Corresponds to packages/compiler/src/render3/r3_ast.ts
//! Contains AST node definitions for Render3 templates

use serde::{Deserialize, Serialize};

use crate::expression_parser::ast::AST as ExprAST;

/// Identity of a template node.
///
/// Element, template, variable and reference nodes each carry one; it is unique
/// within a single parsed template and is what the binder and type-checker key
/// their tables by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn new(id: u32) -> Self {
        NodeId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Text node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

impl Text {
    pub fn new(value: String) -> Self {
        Text { value }
    }
}

/// Bound text node (interpolation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundText {
    pub value: ExprAST,
}

impl BoundText {
    pub fn new(value: ExprAST) -> Self {
        BoundText { value }
    }
}

/// Text attribute in the template
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAttribute {
    pub name: String,
    pub value: String,
}

impl TextAttribute {
    pub fn new(name: String, value: String) -> Self {
        TextAttribute { name, value }
    }
}

/// Bound attribute node (`[name]="value"`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundAttribute {
    pub name: String,
    pub value: ExprAST,
}

impl BoundAttribute {
    pub fn new(name: String, value: ExprAST) -> Self {
        BoundAttribute { name, value }
    }
}

/// Element node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<TextAttribute>,
    #[serde(default)]
    pub inputs: Vec<BoundAttribute>,
    #[serde(default)]
    pub children: Vec<R3Node>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

/// Template node (`<ng-template>` or a structural-directive desugaring)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub id: NodeId,
    pub tag_name: Option<String>,
    #[serde(default)]
    pub attributes: Vec<TextAttribute>,
    #[serde(default)]
    pub inputs: Vec<BoundAttribute>,
    #[serde(default)]
    pub template_attrs: Vec<TemplateAttr>,
    #[serde(default)]
    pub children: Vec<R3Node>,
    #[serde(default)]
    pub references: Vec<Reference>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

/// Template attribute (either bound or text)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum TemplateAttr {
    Bound(BoundAttribute),
    Text(TextAttribute),
}

impl TemplateAttr {
    pub fn name(&self) -> &str {
        match self {
            TemplateAttr::Bound(attr) => &attr.name,
            TemplateAttr::Text(attr) => &attr.name,
        }
    }
}

/// Variable node (`let-name="value"`); an empty value names the `$implicit` context field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variable {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Reference node (`#name` or `#name="exportAs"`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub value: String,
}

/// Enum for all R3 node types that can appear as template children
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum R3Node {
    Text(Text),
    BoundText(BoundText),
    Element(Element),
    Template(Template),
}

impl R3Node {
    /// Identity of element and template nodes
    pub fn id(&self) -> Option<NodeId> {
        match self {
            R3Node::Element(el) => Some(el.id),
            R3Node::Template(tmpl) => Some(tmpl.id),
            R3Node::Text(_) | R3Node::BoundText(_) => None,
        }
    }
}
