// TypeCheck API
//
// Public API types for template type-checking.

use std::fs;
use std::path::Path;

use angular_compiler::render3::r3_ast::NodeId;
use angular_compiler::render3::view::t2_api::DirectiveMeta;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ngtsc::imports::Reference;

/// Configuration for type-checking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeCheckingConfig {
    /// Whether to narrow template bodies through `ngTemplateContextGuard`.
    pub apply_template_context_guards: bool,
    /// Whether to descend into nested templates at all.
    pub check_template_bodies: bool,
    /// Whether to check bindings to DOM properties no directive claims.
    pub check_type_of_dom_bindings: bool,
    /// Whether static attributes feed directive inputs as string literals.
    pub check_type_of_attributes: bool,
    /// Whether `ctx` keeps the component's generic type parameters.
    pub use_context_generic_type: bool,
}

impl Default for TypeCheckingConfig {
    fn default() -> Self {
        Self {
            apply_template_context_guards: true,
            check_template_bodies: true,
            check_type_of_dom_bindings: true,
            check_type_of_attributes: false,
            use_context_generic_type: true,
        }
    }
}

impl TypeCheckingConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_json_str(&content)?)
    }
}

/// Error reading a `TypeCheckingConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid type-checking config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Directive metadata needed to type-check its usage in a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCheckableDirectiveMeta {
    /// The directive class.
    #[serde(rename = "ref")]
    pub ref_: Reference,
    /// Input mapping, class field name -> binding property name.
    #[serde(default)]
    pub inputs: IndexMap<String, String>,
    /// Inputs with a static `ngTemplateGuard_<input>` method, in declaration order.
    #[serde(default)]
    pub ng_template_guards: Vec<String>,
    /// Whether the directive declares a static `ngTemplateContextGuard`.
    #[serde(default)]
    pub has_ng_template_context_guard: bool,
    #[serde(default)]
    pub export_as: Option<Vec<String>>,
    #[serde(default)]
    pub is_component: bool,
}

impl TypeCheckableDirectiveMeta {
    pub fn new(ref_: Reference) -> Self {
        Self {
            ref_,
            inputs: IndexMap::new(),
            ng_template_guards: Vec::new(),
            has_ng_template_context_guard: false,
            export_as: None,
            is_component: false,
        }
    }

    /// Declare an input whose class field and binding property share a name.
    pub fn with_input(self, name: &str) -> Self {
        self.with_aliased_input(name, name)
    }

    pub fn with_aliased_input(mut self, field: &str, property: &str) -> Self {
        self.inputs.insert(field.to_string(), property.to_string());
        self
    }

    pub fn with_template_guard(mut self, input: &str) -> Self {
        self.ng_template_guards.push(input.to_string());
        self
    }

    pub fn with_context_guard(mut self) -> Self {
        self.has_ng_template_context_guard = true;
        self
    }

    pub fn exported_as(mut self, name: &str) -> Self {
        self.export_as
            .get_or_insert_with(Vec::new)
            .push(name.to_string());
        self
    }

    pub fn as_component(mut self) -> Self {
        self.is_component = true;
        self
    }

    /// Whether some input of this directive binds `property`.
    pub fn claims_property(&self, property: &str) -> bool {
        self.inputs.values().any(|p| p == property)
    }
}

impl DirectiveMeta for TypeCheckableDirectiveMeta {
    fn name(&self) -> &str {
        self.ref_.debug_name()
    }

    fn is_component(&self) -> bool {
        self.is_component
    }

    fn export_as(&self) -> Option<&[String]> {
        self.export_as.as_deref()
    }
}

/// The component whose template a type-check block checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTypeCheckMeta {
    #[serde(rename = "ref")]
    pub ref_: Reference,
    /// Names of the component class's generic type parameters.
    #[serde(default)]
    pub type_parameters: Vec<String>,
}

impl ComponentTypeCheckMeta {
    pub fn new(ref_: Reference) -> Self {
        Self {
            ref_,
            type_parameters: Vec::new(),
        }
    }

    pub fn with_type_parameters(mut self, params: &[&str]) -> Self {
        self.type_parameters = params.iter().map(|p| p.to_string()).collect();
        self
    }
}

/// Defects that abort generation of a type-check block.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TcbError {
    /// No scope in the chain has an operation for the entity.
    #[error("could not resolve {0} in the type-check block")]
    UnresolvedEntity(String),
    /// The binder has no target for a reference used in an expression.
    #[error("reference {0} has no known target")]
    UnknownReferenceTarget(NodeId),
    /// An operation whose value was requested produced none.
    #[error("operation {index} of scope {scope} produced no value")]
    MissingOpResult { scope: usize, index: usize },
    /// The expression translator cannot express an expression.
    #[error("unsupported expression in template: {0}")]
    UnsupportedExpression(String),
}
