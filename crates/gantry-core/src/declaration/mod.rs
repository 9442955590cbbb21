//! # Gantry Core Declarations
//!
//! Bookkeeping for what exists before anything is constructed.
//!
//! - **[`registry`]**: the append-only [`DeclarationRegistry`] mapping each
//!   [`ComponentId`](crate::kernel::ComponentId) to its load-order hint,
//!   ordered dependency list and construction step.
//! - **[`bundle`]**: named groups of declarations that can be checked for
//!   existence as a unit.
pub mod bundle;
pub mod registry;

pub use bundle::Bundle;
pub use registry::{DeclarationRegistry, DeclareOutcome};

#[cfg(test)]
mod tests;
