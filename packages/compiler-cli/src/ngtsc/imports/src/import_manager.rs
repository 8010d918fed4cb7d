//! Import Manager
//!
//! Hands out namespace aliases (`i0`, `i1`, ...) for modules referenced by
//! generated code and renders the matching import declarations.

use indexmap::IndexMap;
use ts::Expression;

use super::emitter::ReferenceEmitter;
use super::references::Reference;

/// Tracks the namespace imports a generated file needs.
#[derive(Debug)]
pub struct ImportManager {
    /// Map of module specifier -> alias, in first-use order.
    imports: IndexMap<String, String>,
    /// Prefix for generated aliases.
    prefix: String,
}

impl ImportManager {
    pub fn new() -> Self {
        Self::with_prefix("i")
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            imports: IndexMap::new(),
            prefix: prefix.into(),
        }
    }

    /// Get the alias for a module, generating one if it doesn't exist.
    pub fn get_or_generate_alias(&mut self, specifier: &str) -> String {
        if let Some(alias) = self.imports.get(specifier) {
            return alias.clone();
        }

        let alias = format!("{}{}", self.prefix, self.imports.len());
        self.imports.insert(specifier.to_string(), alias.clone());
        alias
    }

    /// `(specifier, alias)` pairs in the order the modules were first referenced.
    pub fn imports(&self) -> Vec<(String, String)> {
        self.imports
            .iter()
            .map(|(specifier, alias)| (specifier.clone(), alias.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    /// Generate the import statements to be prepended to the file.
    pub fn render_imports(&self) -> String {
        self.imports
            .iter()
            .map(|(specifier, alias)| {
                format!(
                    "import * as {} from {};\n",
                    alias,
                    Expression::string(specifier.as_str())
                )
            })
            .collect()
    }
}

impl Default for ImportManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceEmitter for ImportManager {
    fn reference_expression(&mut self, reference: &Reference) -> Expression {
        match reference.owned_by_module_guess() {
            Some(specifier) => {
                let alias = self.get_or_generate_alias(specifier);
                Expression::identifier(alias).prop(reference.debug_name())
            }
            None => Expression::identifier(reference.debug_name()),
        }
    }
}
