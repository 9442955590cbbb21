//! # Gantry Core Resolver Errors
//!
//! Failures detected while computing the construction plan. Both variants
//! are raised before any component is constructed.
use thiserror::Error;

use crate::kernel::component::ComponentId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// A dependency names an identity that was never declared.
    #[error("Unknown component '{id}'{}", .required_by.as_ref().map(|owner| format!(" (required by '{owner}')")).unwrap_or_default())]
    UnknownIdentity {
        id: ComponentId,
        required_by: Option<ComponentId>,
    },

    /// A dependency chain revisits an identity that is still in flight.
    /// The path starts and ends with the same identity.
    #[error("Circular dependency detected: {}", format_cycle(.cycle))]
    CyclicDependency { cycle: Vec<ComponentId> },
}

impl ResolutionError {
    /// The identity the error is about: the missing one, or the one that closed the cycle.
    pub fn component(&self) -> Option<&ComponentId> {
        match self {
            ResolutionError::UnknownIdentity { id, .. } => Some(id),
            ResolutionError::CyclicDependency { cycle } => cycle.first(),
        }
    }
}

fn format_cycle(cycle: &[ComponentId]) -> String {
    cycle.iter().map(ComponentId::as_str).collect::<Vec<_>>().join(" -> ")
}
