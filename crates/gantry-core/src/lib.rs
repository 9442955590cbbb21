pub mod config;
pub mod declaration;
pub mod kernel;
pub mod logging;
pub mod resolver;

// Re-export key public types/traits for easier use by the binary and applications
pub use config::{LifecycleSettings, Manifest};
pub use declaration::{Bundle, DeclarationRegistry, DeclareOutcome};
pub use kernel::error::Error as KernelError;
pub use kernel::{Application, ComponentId, ComponentState, Controller, Declaration, LifecycleReport, Lookup};
pub use logging::{LogFacadeSink, LogSink, MemorySink};
pub use resolver::{ConstructionPlan, DependencyResolver};
