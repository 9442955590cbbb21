use std::sync::Arc;

use crate::kernel::component::ComponentId;
use crate::kernel::error::Error;
use crate::kernel::lookup::Lookup;

#[derive(Debug, PartialEq)]
struct Clock(u64);

#[tokio::test]
async fn test_lookup_before_run_fails_not_started() {
    let lookup = Lookup::new();
    lookup.store(ComponentId::of::<Clock>(), Arc::new(Clock(1))).await.unwrap();

    let err = lookup.resolve::<Clock>().await.unwrap_err();
    assert!(matches!(err, Error::NotStartedYet { ref id } if *id == ComponentId::of::<Clock>()));
}

#[tokio::test]
async fn test_lookup_unknown_identity_fails_not_registered() {
    let lookup = Lookup::new();
    lookup.mark_initiated();
    let err = lookup.resolve_id(&ComponentId::new("ghost")).await.unwrap_err();
    assert!(matches!(err, Error::NotRegistered { ref id } if id.as_str() == "ghost"));
}

#[tokio::test]
async fn test_lookup_returns_stored_instance() {
    let lookup = Lookup::new();
    let clock = Arc::new(Clock(42));
    lookup.store(ComponentId::of::<Clock>(), clock.clone()).await.unwrap();
    lookup.mark_initiated();

    let resolved = lookup.resolve::<Clock>().await.unwrap();
    assert!(Arc::ptr_eq(&resolved, &clock));
    assert!(lookup.contains(&ComponentId::of::<Clock>()).await);
    assert_eq!(lookup.registered_ids().await, vec![ComponentId::of::<Clock>()]);
}

#[tokio::test]
async fn test_lookup_type_mismatch() {
    let lookup = Lookup::new();
    lookup.store(ComponentId::new("clock"), Arc::new(Clock(3))).await.unwrap();
    lookup.mark_initiated();

    let err = lookup.resolve_as::<String>(&ComponentId::new("clock")).await.unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
    assert_eq!(*lookup.resolve_as::<Clock>(&ComponentId::new("clock")).await.unwrap(), Clock(3));
}

#[tokio::test]
async fn test_lookup_clones_share_state() {
    let lookup = Lookup::new();
    let clone = lookup.clone();
    lookup.mark_initiated();
    clone.store(ComponentId::new("shared"), Arc::new(Clock(0))).await.unwrap();

    assert!(clone.is_initiated());
    assert!(lookup.resolve_id(&ComponentId::new("shared")).await.is_ok());
    assert!(matches!(
        lookup.store(ComponentId::new("shared"), Arc::new(Clock(1))).await,
        Err(Error::InstanceAlreadyStored { .. })
    ));
}
