//! Type-Check Testing Utilities
//!
//! Builders for bound templates and helpers that render type-check blocks to text.

pub mod template_builder;

pub use template_builder::*;

use angular_compiler::render3::view::t2_binder::R3BoundTarget;

use super::api::{ComponentTypeCheckMeta, TcbError, TypeCheckableDirectiveMeta, TypeCheckingConfig};
use super::src::type_check_block::TypeCheckBlockGenerator;
use crate::ngtsc::imports::{ImportManager, Reference};

/// Module every test directive is declared in.
pub const DIRECTIVE_MODULE: &str = "./dirs";

/// A directive class exported from [`DIRECTIVE_MODULE`].
pub fn directive(name: &str) -> TypeCheckableDirectiveMeta {
    TypeCheckableDirectiveMeta::new(Reference::external(name, DIRECTIVE_MODULE))
}

/// The component owning the template under test, declared in the shim file itself.
pub fn test_component() -> ComponentTypeCheckMeta {
    ComponentTypeCheckMeta::new(Reference::from_name("TestComponent"))
}

/// Generate the TCB `_tcb1` for `bound`, returning the printed function.
pub fn try_tcb(
    bound: &R3BoundTarget<TypeCheckableDirectiveMeta>,
    config: TypeCheckingConfig,
) -> Result<String, TcbError> {
    try_tcb_for(bound, &test_component(), config)
}

pub fn try_tcb_for(
    bound: &R3BoundTarget<TypeCheckableDirectiveMeta>,
    component: &ComponentTypeCheckMeta,
    config: TypeCheckingConfig,
) -> Result<String, TcbError> {
    let mut imports = ImportManager::new();
    let function = TypeCheckBlockGenerator::new(config).generate("_tcb1", component, bound, &mut imports)?;
    Ok(function.to_string())
}

pub fn tcb(bound: &R3BoundTarget<TypeCheckableDirectiveMeta>) -> String {
    tcb_with_config(bound, TypeCheckingConfig::default())
}

pub fn tcb_with_config(
    bound: &R3BoundTarget<TypeCheckableDirectiveMeta>,
    config: TypeCheckingConfig,
) -> String {
    match try_tcb(bound, config) {
        Ok(text) => text,
        Err(err) => panic!("TCB generation failed: {}", err),
    }
}
