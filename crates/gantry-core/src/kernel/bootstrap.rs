use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;

use crate::config::settings::LifecycleSettings;
use crate::declaration::{Bundle, DeclarationRegistry, DeclareOutcome};
use crate::kernel::component::{ComponentId, ComponentState, Declaration, Dependencies, Instance};
use crate::kernel::constants;
use crate::kernel::error::{Error, Result};
use crate::kernel::lookup::Lookup;
use crate::logging::{LogFacadeSink, LogSink};
use crate::resolver::{ConstructionPlan, DependencyResolver};

/// A start hook that returned an error or panicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartFailure {
    pub id: ComponentId,
    pub message: String,
}

impl From<StartFailure> for Error {
    fn from(failure: StartFailure) -> Self {
        Error::StartFailed {
            id: failure.id,
            message: failure.message,
        }
    }
}

/// Outcome of a successful [`Application::run_lifecycle`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleReport {
    /// Components in the order they were constructed and initialized.
    pub construction_order: Vec<ComponentId>,
    /// Components whose start phase completed, in construction order.
    pub started: Vec<ComponentId>,
    /// Start hooks that failed, in construction order.
    pub start_failures: Vec<StartFailure>,
    /// Bundles imported before the run.
    pub bundles: Vec<String>,
}

impl LifecycleReport {
    /// True when no start hook failed.
    pub fn is_clean(&self) -> bool {
        self.start_failures.is_empty()
    }

    pub fn failed_ids(&self) -> Vec<&ComponentId> {
        self.start_failures.iter().map(|failure| &failure.id).collect()
    }
}

/// Orchestration context: declarations, instance table, per-component state.
///
/// One application drives exactly one lifecycle run. Independent
/// applications share nothing, so tests can build as many as they like.
pub struct Application {
    settings: LifecycleSettings,
    registry: DeclarationRegistry,
    bundles: Vec<Bundle>,
    lookup: Lookup,
    states: HashMap<ComponentId, ComponentState>,
    sink: Arc<dyn LogSink>,
    run_initiated: bool,
}

impl Application {
    /// Creates an application with default settings, logging through the `log` facade.
    pub fn new() -> Self {
        Self::with_settings(LifecycleSettings::default())
    }

    pub fn with_settings(settings: LifecycleSettings) -> Self {
        log::debug!("Creating {} v{} orchestration context", constants::APP_NAME, constants::APP_VERSION);
        Self {
            registry: DeclarationRegistry::new(settings.duplicate_policy),
            settings,
            bundles: Vec::new(),
            lookup: Lookup::new(),
            states: HashMap::new(),
            sink: Arc::new(LogFacadeSink),
            run_initiated: false,
        }
    }

    /// Replace the log sink.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Record a declaration. Must happen before [`run_lifecycle`](Self::run_lifecycle).
    pub fn declare(&mut self, declaration: impl Into<Declaration>) -> Result<DeclareOutcome> {
        let declaration = declaration.into();
        let id = declaration.id().clone();
        let outcome = self.registry.declare(declaration)?;
        match outcome {
            DeclareOutcome::Declared => {
                self.states.insert(id, ComponentState::Unconstructed);
            }
            DeclareOutcome::Ignored => {
                self.sink
                    .warning(&format!("Component '{}' is already declared; keeping the first declaration", id));
            }
        }
        Ok(outcome)
    }

    /// Check that every member of `bundle` has been declared.
    pub fn verify_bundle(&self, bundle: &Bundle) -> Result<()> {
        self.registry.verify_bundle(bundle)
    }

    /// Verify a bundle and record it for the lifecycle report.
    pub fn import(&mut self, bundle: Bundle) -> Result<()> {
        if self.run_initiated {
            return Err(Error::LifecycleAlreadyStarted);
        }
        self.verify_bundle(&bundle)?;
        log::debug!("Imported bundle '{}' ({} members)", bundle.name(), bundle.members().len());
        self.bundles.push(bundle);
        Ok(())
    }

    /// The construction plan the next run would follow.
    pub fn plan(&self) -> Result<ConstructionPlan> {
        Ok(DependencyResolver::new(&self.registry).plan()?)
    }

    /// Construct and initialize every declared component, then start them all.
    ///
    /// Construction and init run sequentially in plan order; the first failure
    /// halts the run and is returned. Start hooks run concurrently once every
    /// component is initialized; their failures are logged as warnings and
    /// collected in the report. A second call fails with
    /// [`Error::LifecycleAlreadyStarted`].
    pub async fn run_lifecycle(&mut self) -> Result<LifecycleReport> {
        if self.run_initiated {
            return Err(Error::LifecycleAlreadyStarted);
        }
        self.run_initiated = true;
        self.registry.freeze();
        self.lookup.mark_initiated();

        let mut report = LifecycleReport {
            bundles: self.bundles.iter().map(|bundle| bundle.name().to_string()).collect(),
            ..LifecycleReport::default()
        };

        if self.registry.is_empty() {
            self.sink.info("No components declared; nothing to start");
            return Ok(report);
        }

        let plan = match DependencyResolver::new(&self.registry).plan() {
            Ok(plan) => plan,
            Err(err) => {
                self.sink.error(&format!("Dependency resolution failed: {}", err));
                return Err(err.into());
            }
        };

        log::info!("Initializing {} components...", plan.len());
        for id in plan.ids() {
            self.ensure_initialized(&id).await?;
            report.construction_order.push(id);
        }
        log::info!("Component initialization complete.");

        let (started, start_failures) = self.start_all(&report.construction_order).await;
        report.started = started;
        report.start_failures = start_failures;
        log::info!(
            "Component start complete: {} started, {} failed.",
            report.started.len(),
            report.start_failures.len()
        );
        Ok(report)
    }

    /// Construct and initialize one planned component. Its dependencies come
    /// earlier in the plan and are already initialized.
    async fn ensure_initialized(&mut self, id: &ComponentId) -> Result<()> {
        // Backstop only: plans never name an undeclared identity.
        let Some(declaration) = self.registry.get(id) else {
            return Err(crate::resolver::ResolutionError::UnknownIdentity {
                id: id.clone(),
                required_by: None,
            }
            .into());
        };

        self.states.insert(id.clone(), ComponentState::Constructing);
        let mut resolved: Vec<(ComponentId, Instance)> = Vec::with_capacity(declaration.dependencies().len());
        for dependency in declaration.dependencies() {
            let instance = self.lookup.resolve_id(dependency).await?;
            resolved.push((dependency.clone(), instance));
        }

        log::debug!("Constructing component: {}", id);
        let dependencies = Dependencies::new(id, &resolved, &self.lookup);
        let instance = match declaration.construct(&dependencies) {
            Ok(instance) => instance,
            Err(source) => {
                self.states.insert(id.clone(), ComponentState::ConstructionFailed);
                self.sink
                    .error(&format!("Construction of component '{}' failed: {}; halting startup", id, source));
                return Err(Error::ConstructionFailed { id: id.clone(), source });
            }
        };

        if let Some(init) = declaration.init_hook() {
            log::debug!("Initializing component: {}", id);
            if let Err(source) = init(instance.clone()).await {
                self.states.insert(id.clone(), ComponentState::InitFailed);
                self.sink
                    .error(&format!("Init hook of component '{}' failed: {}; halting startup", id, source));
                return Err(Error::InitFailed { id: id.clone(), source });
            }
        }

        self.lookup.store(id.clone(), instance).await?;
        self.states.insert(id.clone(), ComponentState::Initialized);
        Ok(())
    }

    /// Launch every start hook as its own task and wait for all of them.
    async fn start_all(&mut self, order: &[ComponentId]) -> (Vec<ComponentId>, Vec<StartFailure>) {
        let mut pending = Vec::new();
        let mut handles = Vec::new();
        for id in order {
            let hook = self.registry.get(id).and_then(Declaration::start_hook);
            let instance = self.lookup.resolve_id(id).await;
            match (hook, instance) {
                (Some(hook), Ok(instance)) => {
                    log::debug!("Starting component: {}", id);
                    pending.push(id.clone());
                    handles.push(tokio::spawn(hook(instance, self.lookup.clone())));
                }
                _ => {
                    self.states.insert(id.clone(), ComponentState::Started);
                }
            }
        }

        let mut failures = Vec::new();
        for (id, outcome) in pending.into_iter().zip(join_all(handles).await) {
            let message = match outcome {
                Ok(Ok(())) => {
                    self.states.insert(id, ComponentState::Started);
                    continue;
                }
                Ok(Err(err)) => err.to_string(),
                Err(join_err) => format!("start hook panicked: {}", join_err),
            };
            self.sink
                .warning(&format!("Start hook of component '{}' failed: {}", id, message));
            self.states.insert(id.clone(), ComponentState::StartFailed);
            failures.push(StartFailure { id, message });
        }

        let started = order
            .iter()
            .filter(|id| self.states.get(*id) == Some(&ComponentState::Started))
            .cloned()
            .collect();
        (started, failures)
    }

    /// Lifecycle state of a declared component; `None` if undeclared.
    pub fn state_of(&self, id: &ComponentId) -> Option<ComponentState> {
        self.states.get(id).copied()
    }

    /// Handle onto the lookup facility; valid once the run is initiated.
    pub fn lookup(&self) -> Lookup {
        self.lookup.clone()
    }

    /// Convenience for [`Lookup::resolve`].
    pub async fn resolve<T: std::any::Any + Send + Sync>(&self) -> Result<Arc<T>> {
        self.lookup.resolve::<T>().await
    }

    pub fn declarations(&self) -> &DeclarationRegistry {
        &self.registry
    }

    pub fn bundles(&self) -> &[Bundle] {
        &self.bundles
    }

    pub fn settings(&self) -> &LifecycleSettings {
        &self.settings
    }

    /// Whether [`run_lifecycle`](Self::run_lifecycle) has been called.
    pub fn is_started(&self) -> bool {
        self.run_initiated
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}
