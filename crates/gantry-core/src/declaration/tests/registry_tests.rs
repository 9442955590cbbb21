use crate::config::settings::DuplicatePolicy;
use crate::declaration::{DeclarationRegistry, DeclareOutcome};
use crate::kernel::component::{ComponentId, Declaration};
use crate::kernel::error::Error;

#[derive(Debug)]
struct Marker(&'static str);

fn marker(name: &'static str, load_order: i32) -> Declaration {
    Declaration::named::<Marker, _>(name, move |_deps| Ok(Marker(name)))
        .load_order(load_order)
        .build()
}

#[test]
fn test_registry_preserves_declaration_order() {
    let mut registry = DeclarationRegistry::default();
    for (name, load_order) in [("c", 2), ("a", 0), ("b", 1)] {
        registry.declare(marker(name, load_order)).unwrap();
    }
    assert_eq!(registry.ids(), vec![ComponentId::new("c"), ComponentId::new("a"), ComponentId::new("b")]);
    assert_eq!(registry.position_of(&ComponentId::new("a")), Some(1));
    assert_eq!(registry.len(), 3);
}

#[test]
fn test_registry_reports_metadata() {
    let mut registry = DeclarationRegistry::default();
    registry
        .declare(Declaration::named::<Marker, _>("api", |_deps| Ok(Marker("api"))).load_order(4).depends_on_id("db"))
        .unwrap();

    let api = ComponentId::new("api");
    assert!(registry.is_declared(&api));
    assert_eq!(registry.load_order_of(&api).unwrap(), 4);
    assert_eq!(registry.dependencies_of(&api).unwrap(), &[ComponentId::new("db")]);
    assert!(registry.get(&api).is_some());
}

#[test]
fn test_registry_unknown_identity() {
    let registry = DeclarationRegistry::default();
    let ghost = ComponentId::new("ghost");
    assert!(!registry.is_declared(&ghost));
    assert!(registry.get(&ghost).is_none());
    assert!(registry.load_order_of(&ghost).unwrap_err().is_unknown_identity());
    assert!(registry.dependencies_of(&ghost).unwrap_err().is_unknown_identity());
}

#[test]
fn test_keep_first_ignores_duplicates() {
    let mut registry = DeclarationRegistry::new(DuplicatePolicy::KeepFirst);
    assert_eq!(registry.declare(marker("svc", 1)).unwrap(), DeclareOutcome::Declared);
    assert_eq!(registry.declare(marker("svc", 9)).unwrap(), DeclareOutcome::Ignored);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.load_order_of(&ComponentId::new("svc")).unwrap(), 1);
}

#[test]
fn test_reject_policy_fails_duplicates() {
    let mut registry = DeclarationRegistry::new(DuplicatePolicy::Reject);
    registry.declare(marker("svc", 1)).unwrap();
    let err = registry.declare(marker("svc", 1)).unwrap_err();
    assert!(matches!(err, Error::DuplicateDeclaration { ref id } if id.as_str() == "svc"));
    assert_eq!(registry.policy(), DuplicatePolicy::Reject);
}

#[test]
fn test_frozen_registry_refuses_declarations() {
    let mut registry = DeclarationRegistry::default();
    registry.declare(marker("early", 0)).unwrap();
    registry.freeze();
    assert!(registry.is_frozen());
    assert!(matches!(registry.declare(marker("late", 0)), Err(Error::LifecycleAlreadyStarted)));
    assert_eq!(registry.len(), 1);
}
