// References Tests

use super::super::src::references::*;

#[test]
fn test_owning_module() {
    let module = OwningModule::new("@angular/core");
    assert_eq!(module.specifier, "@angular/core");
}

#[test]
fn test_reference_from_name() {
    let reference = Reference::from_name("MyComponent");
    assert_eq!(reference.debug_name(), "MyComponent");
    assert!(reference.is_local());
    assert!(reference.owned_by_module_guess().is_none());
    assert_eq!(reference.to_string(), "MyComponent");
}

#[test]
fn test_reference_with_owning_module() {
    let reference = Reference::external("NgIf", "@angular/common");
    assert_eq!(reference.owned_by_module_guess(), Some("@angular/common"));
    assert!(!reference.is_local());
    assert_eq!(reference.to_string(), "NgIf from '@angular/common'");
}

#[test]
fn test_reference_identity() {
    let a = Reference::external("Dir", "./dir");
    let b = Reference::external("Dir", "./dir");
    let c = Reference::external("Dir", "./other");
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, Reference::from_name("Dir"));
}

#[test]
fn test_reference_from_json() {
    let external: Reference =
        serde_json::from_str(r#"{ "name": "NgIf", "module": "@angular/common" }"#).unwrap();
    assert_eq!(external, Reference::external("NgIf", "@angular/common"));

    let local: Reference = serde_json::from_str(r#"{ "name": "AppCmp" }"#).unwrap();
    assert!(local.is_local());
}
