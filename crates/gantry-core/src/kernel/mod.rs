//! # Gantry Core Kernel
//!
//! The `kernel` module forms the heart of `gantry-core`. It drives the
//! three-phase lifecycle of declared components and exposes the instances it
//! produced.
//!
//! ## Key Responsibilities & Components:
//!
//! - **Lifecycle Orchestration**: [`Application`](bootstrap::Application) in the
//!   `bootstrap` submodule constructs and initializes every component in
//!   resolver order, halting on the first failure, then runs every start hook
//!   concurrently and collects their outcomes in a
//!   [`LifecycleReport`](bootstrap::LifecycleReport).
//! - **Component Model**: [`ComponentId`], [`Declaration`] and its typed
//!   builder, the [`Controller`] trait, the [`InstanceTable`] and per-component
//!   [`ComponentState`], all in the `component` submodule.
//! - **Lookup Facility**: [`Lookup`](lookup::Lookup), a cloneable read-only
//!   handle onto the instance table.
//! - **Error Handling**: the kernel [`Error`](error::Error) and `Result` alias
//!   in the `error` submodule.
pub mod bootstrap;
pub mod component;
pub mod constants;
pub mod error;
pub mod lookup;

pub use bootstrap::{Application, LifecycleReport, StartFailure};
pub use component::{
    ComponentId, ComponentState, Controller, Declaration, DeclarationBuilder, Dependencies, HookResult, Instance,
    InstanceTable,
};
pub use error::{BoxError, Error, Result};
pub use lookup::Lookup;

// Test module declaration
#[cfg(test)]
mod tests;
