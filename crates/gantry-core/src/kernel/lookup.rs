//! Post-startup access to initialized component instances.
use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::RwLock;

use crate::kernel::component::{ComponentId, Instance, InstanceTable};
use crate::kernel::error::{Error, Result};

/// Cloneable handle onto the instance table of one [`Application`](crate::kernel::Application).
///
/// Lookups never construct anything. Before the lifecycle run has been
/// initiated every lookup fails with [`Error::NotStartedYet`]; afterwards an
/// identity without an initialized instance fails with [`Error::NotRegistered`].
#[derive(Clone, Default)]
pub struct Lookup {
    inner: Arc<LookupState>,
}

#[derive(Default)]
struct LookupState {
    initiated: AtomicBool,
    table: RwLock<InstanceTable>,
}

impl Lookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn mark_initiated(&self) {
        self.inner.initiated.store(true, Ordering::SeqCst);
    }

    /// Whether the owning application has begun its lifecycle run.
    pub fn is_initiated(&self) -> bool {
        self.inner.initiated.load(Ordering::SeqCst)
    }

    pub(crate) async fn store(&self, id: ComponentId, instance: Instance) -> Result<()> {
        self.inner.table.write().await.insert(id, instance)
    }

    /// Resolve the component of type `T`, declared under [`ComponentId::of::<T>`].
    pub async fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        self.resolve_as(&ComponentId::of::<T>()).await
    }

    /// Resolve a component by identity and downcast it to `T`.
    pub async fn resolve_as<T: Any + Send + Sync>(&self, id: &ComponentId) -> Result<Arc<T>> {
        self.resolve_id(id).await?.downcast::<T>().map_err(|_| Error::TypeMismatch {
            id: id.clone(),
            expected: type_name::<T>(),
        })
    }

    /// Resolve a component by identity without downcasting.
    pub async fn resolve_id(&self, id: &ComponentId) -> Result<Instance> {
        if !self.is_initiated() {
            return Err(Error::NotStartedYet { id: id.clone() });
        }
        self.inner
            .table
            .read()
            .await
            .get(id)
            .ok_or_else(|| Error::NotRegistered { id: id.clone() })
    }

    pub async fn contains(&self, id: &ComponentId) -> bool {
        self.inner.table.read().await.contains(id)
    }

    /// Identities with an initialized instance, in the order they were stored.
    pub async fn registered_ids(&self) -> Vec<ComponentId> {
        self.inner.table.read().await.ids().to_vec()
    }
}

impl fmt::Debug for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookup")
            .field("initiated", &self.is_initiated())
            .finish_non_exhaustive()
    }
}
