//! # Gantry Core Kernel Errors
//!
//! Defines the error type shared by every part of the orchestration core.
//!
//! [`Error`] covers declaration bookkeeping, dependency resolution (wrapping
//! [`ResolutionError`]), the fatal construct/init failures, the non-fatal start
//! failures that end up in a [`LifecycleReport`](crate::kernel::LifecycleReport),
//! and misuse of the lookup facility.
use std::result::Result as StdResult;

use thiserror::Error as ThisError;

use crate::config::error::ConfigError;
use crate::kernel::component::ComponentId;
use crate::resolver::error::ResolutionError;

/// Error raised by user-supplied construction steps and lifecycle hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, ThisError)]
pub enum Error {
    /// The identity was already declared and the registry rejects duplicates.
    #[error("Component '{id}' is already declared")]
    DuplicateDeclaration { id: ComponentId },

    /// The dependency graph cannot be resolved.
    #[error("Dependency resolution failed: {0}")]
    Resolution(#[from] ResolutionError),

    /// A bundle names a member that was never declared.
    #[error("Bundle '{bundle}' references undeclared component '{id}'")]
    UnknownBundleMember { bundle: String, id: ComponentId },

    /// The construction step of a component returned an error. Fatal for the run.
    #[error("Construction of component '{id}' failed: {source}")]
    ConstructionFailed {
        id: ComponentId,
        #[source]
        source: BoxError,
    },

    /// The init hook of a component returned an error. Fatal for the run.
    #[error("Init hook of component '{id}' failed: {source}")]
    InitFailed {
        id: ComponentId,
        #[source]
        source: BoxError,
    },

    /// The start hook of a component failed. Recorded, never fatal.
    #[error("Start hook of component '{id}' failed: {message}")]
    StartFailed { id: ComponentId, message: String },

    /// Lookup attempted before the lifecycle run was initiated.
    #[error("Cannot resolve '{id}': the lifecycle has not been started yet")]
    NotStartedYet { id: ComponentId },

    /// Lookup of an identity that has no initialized instance.
    #[error("Component '{id}' is not registered in the instance table")]
    NotRegistered { id: ComponentId },

    /// A construction step asked for a component it did not declare as a dependency.
    #[error("Component '{id}' did not declare a dependency on '{dependency}'")]
    UndeclaredDependency { id: ComponentId, dependency: ComponentId },

    /// The stored instance is not of the requested concrete type.
    #[error("Component '{id}' is not of type {expected}")]
    TypeMismatch { id: ComponentId, expected: &'static str },

    /// The instance table already holds an entry for this identity.
    #[error("An instance of component '{id}' is already stored")]
    InstanceAlreadyStored { id: ComponentId },

    /// `run_lifecycle` was called twice, or declarations arrived after it began.
    #[error("The lifecycle has already been started")]
    LifecycleAlreadyStarted,

    /// Manifest or settings could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl Error {
    /// True for a [`ResolutionError::CyclicDependency`].
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Error::Resolution(ResolutionError::CyclicDependency { .. }))
    }

    /// True when the error names an identity missing from the declaration registry.
    pub fn is_unknown_identity(&self) -> bool {
        matches!(
            self,
            Error::Resolution(ResolutionError::UnknownIdentity { .. }) | Error::UnknownBundleMember { .. }
        )
    }

    /// The component the error is attributed to, if any.
    pub fn component(&self) -> Option<&ComponentId> {
        match self {
            Error::DuplicateDeclaration { id }
            | Error::UnknownBundleMember { id, .. }
            | Error::ConstructionFailed { id, .. }
            | Error::InitFailed { id, .. }
            | Error::StartFailed { id, .. }
            | Error::NotStartedYet { id }
            | Error::NotRegistered { id }
            | Error::UndeclaredDependency { id, .. }
            | Error::TypeMismatch { id, .. }
            | Error::InstanceAlreadyStored { id } => Some(id),
            Error::Resolution(err) => err.component(),
            Error::LifecycleAlreadyStarted | Error::Config(_) => None,
        }
    }
}
