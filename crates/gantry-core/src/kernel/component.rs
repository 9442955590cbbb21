use std::any::{Any, type_name};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use crate::kernel::constants;
use crate::kernel::error::{BoxError, Error, Result};
use crate::kernel::lookup::Lookup;

/// Type-erased, shared component instance as stored in the [`InstanceTable`].
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Outcome of a construction step or lifecycle hook.
pub type HookResult = std::result::Result<(), BoxError>;

/// Owned future returned by erased hooks.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

type Factory = Box<dyn Fn(&Dependencies<'_>) -> std::result::Result<Instance, BoxError> + Send + Sync>;
pub(crate) type InitHook = Arc<dyn Fn(Instance) -> BoxFuture<'static, HookResult> + Send + Sync>;
pub(crate) type StartHook = Arc<dyn Fn(Instance, Lookup) -> BoxFuture<'static, HookResult> + Send + Sync>;

/// Unique handle for a component type.
///
/// Cheap to clone. Typed components use [`ComponentId::of`], which derives
/// the identity from the Rust type name; components whose identity comes from
/// data (a manifest, for instance) use [`ComponentId::new`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(Arc<str>);

impl ComponentId {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// Identity of the component type `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self(Arc::from(type_name::<T>()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentId").field(&&*self.0).finish()
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ComponentId {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&ComponentId> for ComponentId {
    fn from(id: &ComponentId) -> Self {
        id.clone()
    }
}

/// Lifecycle state of a single component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentState {
    Unconstructed,
    Constructing,
    Initialized,
    Started,
    StartFailed,
    ConstructionFailed,
    InitFailed,
}

impl ComponentState {
    /// True for the states that halt the lifecycle run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ComponentState::ConstructionFailed | ComponentState::InitFailed)
    }

    /// True once construct and init have both succeeded.
    pub fn is_initialized(&self) -> bool {
        matches!(
            self,
            ComponentState::Initialized | ComponentState::Started | ComponentState::StartFailed
        )
    }
}

impl fmt::Display for ComponentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ComponentState::Unconstructed => "unconstructed",
            ComponentState::Constructing => "constructing",
            ComponentState::Initialized => "initialized",
            ComponentState::Started => "started",
            ComponentState::StartFailed => "start failed",
            ComponentState::ConstructionFailed => "construction failed",
            ComponentState::InitFailed => "init failed",
        };
        f.write_str(label)
    }
}

/// Trait-based lifecycle for components that prefer methods over closures.
///
/// Wire it with [`DeclarationBuilder::controller`]. Both hooks default to
/// doing nothing.
#[async_trait]
pub trait Controller: Send + Sync + 'static {
    async fn init(&self) -> HookResult {
        Ok(())
    }

    async fn start(&self, _lookup: Lookup) -> HookResult {
        Ok(())
    }
}

/// Static record of a component: identity, load-order hint, dependency list,
/// construction step and optional hooks.
pub struct Declaration {
    id: ComponentId,
    type_name: &'static str,
    load_order: i32,
    dependencies: Vec<ComponentId>,
    factory: Factory,
    init: Option<InitHook>,
    start: Option<StartHook>,
}

impl Declaration {
    /// Start declaring the component type `T`, identified by [`ComponentId::of::<T>`].
    pub fn of<T, F>(factory: F) -> DeclarationBuilder<T>
    where
        T: Send + Sync + 'static,
        F: Fn(&Dependencies<'_>) -> std::result::Result<T, BoxError> + Send + Sync + 'static,
    {
        Self::named(ComponentId::of::<T>(), factory)
    }

    /// Start declaring a component of type `T` under an explicit identity.
    pub fn named<T, F>(id: impl Into<ComponentId>, factory: F) -> DeclarationBuilder<T>
    where
        T: Send + Sync + 'static,
        F: Fn(&Dependencies<'_>) -> std::result::Result<T, BoxError> + Send + Sync + 'static,
    {
        let factory: Factory = Box::new(move |deps: &Dependencies<'_>| factory(deps).map(|value| Arc::new(value) as Instance));
        DeclarationBuilder {
            declaration: Declaration {
                id: id.into(),
                type_name: type_name::<T>(),
                load_order: constants::DEFAULT_LOAD_ORDER,
                dependencies: Vec::new(),
                factory,
                init: None,
                start: None,
            },
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> &ComponentId {
        &self.id
    }

    /// Rust type name of the instance this declaration constructs.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn load_order(&self) -> i32 {
        self.load_order
    }

    pub fn dependencies(&self) -> &[ComponentId] {
        &self.dependencies
    }

    pub fn has_init_hook(&self) -> bool {
        self.init.is_some()
    }

    pub fn has_start_hook(&self) -> bool {
        self.start.is_some()
    }

    pub(crate) fn construct(&self, deps: &Dependencies<'_>) -> std::result::Result<Instance, BoxError> {
        (self.factory)(deps)
    }

    pub(crate) fn init_hook(&self) -> Option<InitHook> {
        self.init.clone()
    }

    pub(crate) fn start_hook(&self) -> Option<StartHook> {
        self.start.clone()
    }
}

impl fmt::Debug for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declaration")
            .field("id", &self.id)
            .field("type_name", &self.type_name)
            .field("load_order", &self.load_order)
            .field("dependencies", &self.dependencies)
            .field("init", &self.init.is_some())
            .field("start", &self.start.is_some())
            .finish_non_exhaustive()
    }
}

/// Typed builder for a [`Declaration`]; hooks receive `Arc<T>`.
pub struct DeclarationBuilder<T> {
    declaration: Declaration,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> DeclarationBuilder<T> {
    /// Set the load-order hint. Lower values are attempted first among
    /// components with no dependency relationship.
    pub fn load_order(mut self, load_order: i32) -> Self {
        self.declaration.load_order = load_order;
        self
    }

    /// Depend on the component type `U`.
    pub fn depends_on<U: ?Sized + 'static>(self) -> Self {
        self.depends_on_id(ComponentId::of::<U>())
    }

    /// Depend on a component by identity. Order of calls is resolution order.
    pub fn depends_on_id(mut self, id: impl Into<ComponentId>) -> Self {
        self.declaration.dependencies.push(id.into());
        self
    }

    /// Install the init hook, run right after construction.
    pub fn on_init<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Arc<T>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult> + Send + 'static,
    {
        let id = self.declaration.id.clone();
        let erased: InitHook = Arc::new(move |instance: Instance| match instance.downcast::<T>() {
            Ok(this) => Box::pin(hook(this)) as BoxFuture<'static, HookResult>,
            Err(_) => mismatch::<T>(id.clone()),
        });
        self.declaration.init = Some(erased);
        self
    }

    /// Install the start hook, run concurrently with every other start hook
    /// once all components are initialized.
    pub fn on_start<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(Arc<T>, Lookup) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HookResult> + Send + 'static,
    {
        let id = self.declaration.id.clone();
        let erased: StartHook = Arc::new(move |instance: Instance, lookup: Lookup| match instance.downcast::<T>() {
            Ok(this) => Box::pin(hook(this, lookup)) as BoxFuture<'static, HookResult>,
            Err(_) => mismatch::<T>(id.clone()),
        });
        self.declaration.start = Some(erased);
        self
    }

    pub fn build(self) -> Declaration {
        self.declaration
    }
}

impl<T: Controller> DeclarationBuilder<T> {
    /// Install both hooks from the [`Controller`] implementation of `T`.
    pub fn controller(self) -> Self {
        self.on_init(|this: Arc<T>| async move { this.init().await })
            .on_start(|this: Arc<T>, lookup: Lookup| async move { this.start(lookup).await })
    }
}

impl<T: Send + Sync + 'static> From<DeclarationBuilder<T>> for Declaration {
    fn from(builder: DeclarationBuilder<T>) -> Self {
        builder.build()
    }
}

fn mismatch<T>(id: ComponentId) -> BoxFuture<'static, HookResult> {
    Box::pin(async move {
        Err(Box::new(Error::TypeMismatch { id, expected: type_name::<T>() }) as BoxError)
    })
}

/// The resolved dependencies handed to a construction step.
///
/// Only the component's declared dependencies are visible, in declared order.
pub struct Dependencies<'a> {
    owner: &'a ComponentId,
    resolved: &'a [(ComponentId, Instance)],
    lookup: &'a Lookup,
}

impl<'a> Dependencies<'a> {
    pub(crate) fn new(owner: &'a ComponentId, resolved: &'a [(ComponentId, Instance)], lookup: &'a Lookup) -> Self {
        Self { owner, resolved, lookup }
    }

    /// The component being constructed.
    pub fn owner(&self) -> &ComponentId {
        self.owner
    }

    /// Fetch the dependency of type `T`.
    pub fn get<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        self.get_as(&ComponentId::of::<T>())
    }

    /// Fetch a dependency by identity and downcast it to `T`.
    pub fn get_as<T: Any + Send + Sync>(&self, id: &ComponentId) -> Result<Arc<T>> {
        self.get_id(id)?.downcast::<T>().map_err(|_| Error::TypeMismatch {
            id: id.clone(),
            expected: type_name::<T>(),
        })
    }

    /// Fetch a dependency by identity without downcasting.
    pub fn get_id(&self, id: &ComponentId) -> Result<Instance> {
        self.resolved
            .iter()
            .find(|(dep_id, _)| dep_id == id)
            .map(|(_, instance)| instance.clone())
            .ok_or_else(|| Error::UndeclaredDependency {
                id: self.owner.clone(),
                dependency: id.clone(),
            })
    }

    pub fn ids(&self) -> impl Iterator<Item = &ComponentId> {
        self.resolved.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }

    /// A lookup handle the component may keep for use from its start hook onward.
    pub fn lookup(&self) -> Lookup {
        self.lookup.clone()
    }
}

/// Maps identities to constructed, initialized instances.
///
/// Entries are never replaced or removed.
#[derive(Default)]
pub struct InstanceTable {
    instances: HashMap<ComponentId, Instance>,
    order: Vec<ComponentId>,
}

impl InstanceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an instance. Fails if the identity already has one.
    pub fn insert(&mut self, id: ComponentId, instance: Instance) -> Result<()> {
        if self.instances.contains_key(&id) {
            return Err(Error::InstanceAlreadyStored { id });
        }
        self.order.push(id.clone());
        self.instances.insert(id, instance);
        Ok(())
    }

    pub fn get(&self, id: &ComponentId) -> Option<Instance> {
        self.instances.get(id).cloned()
    }

    /// Get an instance downcast to its concrete type.
    pub fn get_concrete<T: Any + Send + Sync>(&self, id: &ComponentId) -> Option<Arc<T>> {
        self.get(id).and_then(|instance| instance.downcast::<T>().ok())
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.instances.contains_key(id)
    }

    /// Identities in the order their instances were stored.
    pub fn ids(&self) -> &[ComponentId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl fmt::Debug for InstanceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceTable").field("ids", &self.order).finish()
    }
}
