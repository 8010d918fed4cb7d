//! References - identity of an external declaration
//!
//! A `Reference` names a class (a component or directive) that generated code needs
//! to refer to, together with the compiler's best guess at the module that exports
//! it. Two references are the same declaration exactly when they are equal.
//!
//! Matches: angular/packages/compiler-cli/src/ngtsc/imports/src/references.ts

use serde::{Deserialize, Serialize};

/// Information about the module that owns a particular reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwningModule {
    /// The module specifier (e.g., "@angular/core").
    pub specifier: String,
}

impl OwningModule {
    pub fn new(specifier: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
        }
    }
}

/// A reference to a declaration.
///
/// When `best_guess_owning_module` is `None` the declaration lives in the file the
/// generated code is emitted into and can be named directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    name: String,
    #[serde(default, rename = "module")]
    best_guess_owning_module: Option<OwningModule>,
}

impl Reference {
    /// Create a reference to a declaration of the current file.
    pub fn from_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            best_guess_owning_module: None,
        }
    }

    /// Create a reference to a declaration exported from `specifier`.
    pub fn external(name: impl Into<String>, specifier: impl Into<String>) -> Self {
        Self::from_name(name).with_owning_module(OwningModule::new(specifier))
    }

    pub fn with_owning_module(mut self, module: OwningModule) -> Self {
        self.best_guess_owning_module = Some(module);
        self
    }

    /// The exported name of the declaration.
    pub fn debug_name(&self) -> &str {
        &self.name
    }

    /// The module specifier which is believed to export this declaration.
    pub fn owned_by_module_guess(&self) -> Option<&str> {
        self.best_guess_owning_module
            .as_ref()
            .map(|m| m.specifier.as_str())
    }

    pub fn is_local(&self) -> bool {
        self.best_guess_owning_module.is_none()
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.owned_by_module_guess() {
            Some(module) => write!(f, "{} from '{}'", self.name, module),
            None => write!(f, "{}", self.name),
        }
    }
}
