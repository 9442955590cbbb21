//! # Gantry Core Configuration
//!
//! Settings that shape a lifecycle run and the manifest format used to
//! describe declarations as data.
//!
//! - **[`format`]**: [`ConfigFormat`] detection by file extension; YAML and
//!   TOML sit behind the `yaml-config` and `toml-config` features.
//! - **[`settings`]**: [`LifecycleSettings`] and the [`DuplicatePolicy`].
//! - **[`manifest`]**: [`Manifest`], a serialisable description of
//!   components and bundles.
//! - **[`error`]**: [`ConfigError`].
pub mod error;
pub mod format;
pub mod manifest;
pub mod settings;

pub use error::ConfigError;
pub use format::ConfigFormat;
pub use manifest::{BundleSpec, ComponentSpec, FailPhase, Manifest};
pub use settings::{DuplicatePolicy, LifecycleSettings};
