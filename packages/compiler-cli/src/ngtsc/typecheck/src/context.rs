// TypeCheck Context Implementation
//
// Collects the templates of a compilation and renders one type-check shim file
// per source file.

use angular_compiler::render3::view::t2_binder::R3BoundTarget;
use indexmap::IndexMap;
use rayon::prelude::*;

use super::super::api::{
    ComponentTypeCheckMeta, TcbError, TypeCheckableDirectiveMeta, TypeCheckingConfig,
};
use super::type_check_block::TypeCheckBlockGenerator;
use crate::ngtsc::imports::ImportManager;
use crate::ngtsc::logging::Logger;

/// A template waiting for its TCB to be generated.
struct PendingTcb {
    name: String,
    component: ComponentTypeCheckMeta,
    bound_target: R3BoundTarget<TypeCheckableDirectiveMeta>,
}

/// Context for generating type-check blocks across shim files.
pub struct TypeCheckingContext {
    /// Configuration.
    config: TypeCheckingConfig,
    /// Shim file path -> templates to check in it, in insertion order.
    files: IndexMap<String, Vec<PendingTcb>>,
}

impl TypeCheckingContext {
    pub fn new(config: TypeCheckingConfig) -> Self {
        Self {
            config,
            files: IndexMap::new(),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &TypeCheckingConfig {
        &self.config
    }

    /// Register a bound template for checking in `shim_path`.
    ///
    /// Returns the name of the TCB function that will be generated for it.
    pub fn add_template(
        &mut self,
        shim_path: impl Into<String>,
        component: ComponentTypeCheckMeta,
        bound_target: R3BoundTarget<TypeCheckableDirectiveMeta>,
    ) -> String {
        let pending = self.files.entry(shim_path.into()).or_default();
        let name = format!("_tcb{}", pending.len() + 1);
        pending.push(PendingTcb {
            name: name.clone(),
            component,
            bound_target,
        });
        name
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn tcb_count(&self) -> usize {
        self.files.values().map(Vec::len).sum()
    }

    /// Generate every shim file, returning `(path, source)` pairs in registration order.
    ///
    /// Files are generated in parallel. Any failing template fails the whole call.
    pub fn finalize(&self, logger: &dyn Logger) -> Result<Vec<(String, String)>, TcbError> {
        let generator = TypeCheckBlockGenerator::new(self.config.clone()).with_logger(logger);
        let files: Vec<(&String, &Vec<PendingTcb>)> = self.files.iter().collect();

        files
            .par_iter()
            .map(|(path, pending)| -> Result<(String, String), TcbError> {
                let source = render_file(&generator, pending)?;
                logger.debug(&format!("rendered {} TCBs into {}", pending.len(), path));
                Ok(((*path).clone(), source))
            })
            .collect()
    }
}

fn render_file(
    generator: &TypeCheckBlockGenerator<'_>,
    pending: &[PendingTcb],
) -> Result<String, TcbError> {
    let mut imports = ImportManager::new();
    let mut functions = Vec::with_capacity(pending.len());
    for tcb in pending {
        let function = generator.generate(&tcb.name, &tcb.component, &tcb.bound_target, &mut imports)?;
        functions.push(function.to_string());
    }

    let mut source = imports.render_imports();
    if !source.is_empty() {
        source.push('\n');
    }
    source.push_str(&functions.join("\n"));
    Ok(source)
}
