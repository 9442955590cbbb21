use crate::declaration::{Bundle, DeclarationRegistry};
use crate::kernel::component::{ComponentId, Declaration};
use crate::kernel::error::Error;

#[derive(Debug)]
struct Storage;

#[derive(Debug)]
struct Cache;

fn registry_with_storage() -> DeclarationRegistry {
    let mut registry = DeclarationRegistry::default();
    registry.declare(Declaration::of::<Storage, _>(|_deps| Ok(Storage))).unwrap();
    registry
}

#[test]
fn test_bundle_members_keep_order() {
    let bundle = Bundle::new("persistence").member::<Storage>().member_id("cache");
    assert_eq!(bundle.name(), "persistence");
    assert_eq!(bundle.members(), &[ComponentId::of::<Storage>(), ComponentId::new("cache")]);
}

#[test]
fn test_bundle_verifies_when_all_declared() {
    let registry = registry_with_storage();
    let bundle = Bundle::new("persistence").member::<Storage>();
    assert!(bundle.verify(&registry).is_ok());
    assert!(registry.verify_bundle(&bundle).is_ok());
}

#[test]
fn test_bundle_names_first_missing_member() {
    let registry = registry_with_storage();
    let bundle = Bundle::new("persistence")
        .member::<Storage>()
        .member::<Cache>()
        .member_id("index");

    match registry.verify_bundle(&bundle) {
        Err(Error::UnknownBundleMember { bundle, id }) => {
            assert_eq!(bundle, "persistence");
            assert_eq!(id, ComponentId::of::<Cache>());
        }
        other => panic!("expected UnknownBundleMember, got {:?}", other),
    }
}

#[test]
fn test_empty_bundle_always_verifies() {
    let registry = DeclarationRegistry::default();
    assert!(Bundle::new("nothing").verify(&registry).is_ok());
}
