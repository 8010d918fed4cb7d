// TypeCheck Input
//
// JSON description of a component template to type-check, as read by `ngtcb`.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use angular_compiler::render3::r3_ast::{NodeId, R3Node};
use angular_compiler::render3::view::t2_api::Target;
use angular_compiler::render3::view::t2_binder::{R3BoundTarget, R3TargetBinder};
use anyhow::Context as _;
use serde::Deserialize;

use super::super::api::{ComponentTypeCheckMeta, TypeCheckableDirectiveMeta};

/// Directives matched on one template node, in match order.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeDirectives {
    pub node: NodeId,
    pub directives: Vec<TypeCheckableDirectiveMeta>,
}

/// A component, its parsed template and the directives matched in it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCheckInput {
    /// Shim file the TCB goes into; derived from the input file name when absent.
    #[serde(default)]
    pub shim: Option<String>,
    pub component: ComponentTypeCheckMeta,
    pub template: Vec<R3Node>,
    #[serde(default)]
    pub directives: Vec<NodeDirectives>,
}

impl TypeCheckInput {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let mut input = Self::from_json_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        input
            .check_node_ids()
            .with_context(|| format!("invalid template in {}", path.display()))?;
        if input.shim.is_none() {
            let stem = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "template".to_string());
            input.shim = Some(format!("{}.ngtypecheck.ts", stem));
        }
        Ok(input)
    }

    /// Every element, template, variable and reference must carry its own id.
    pub fn check_node_ids(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        check_nodes(&self.template, &mut seen)
    }

    /// Bind the template against its directives.
    pub fn bind(self) -> (ComponentTypeCheckMeta, R3BoundTarget<TypeCheckableDirectiveMeta>) {
        let mut directives_by_node: HashMap<NodeId, Vec<TypeCheckableDirectiveMeta>> = HashMap::new();
        for entry in self.directives {
            directives_by_node
                .entry(entry.node)
                .or_default()
                .extend(entry.directives);
        }
        let bound = R3TargetBinder::new(directives_by_node).bind(Target {
            template: self.template,
        });
        (self.component, bound)
    }
}

fn check_nodes(nodes: &[R3Node], seen: &mut HashSet<NodeId>) -> anyhow::Result<()> {
    for node in nodes {
        match node {
            R3Node::Element(element) => {
                claim_id(element.id, seen)?;
                for reference in &element.references {
                    claim_id(reference.id, seen)?;
                }
                check_nodes(&element.children, seen)?;
            }
            R3Node::Template(template) => {
                claim_id(template.id, seen)?;
                for variable in &template.variables {
                    claim_id(variable.id, seen)?;
                }
                for reference in &template.references {
                    claim_id(reference.id, seen)?;
                }
                check_nodes(&template.children, seen)?;
            }
            R3Node::Text(_) | R3Node::BoundText(_) => {}
        }
    }
    Ok(())
}

fn claim_id(id: NodeId, seen: &mut HashSet<NodeId>) -> anyhow::Result<()> {
    if !seen.insert(id) {
        anyhow::bail!("duplicate node id {}", id);
    }
    Ok(())
}
