//! ns-bundle - build pipeline front-end for bundled mobile apps

pub mod cli;
pub mod core;
pub mod execution;
pub mod process;
pub mod snapshot;

// Re-export commonly used types
pub use core::{BuildContext, BuildEnvironment, BuildOptions, Flag, OptionsError, Pipeline, Platform, Step, StepError, StepKind};
pub use execution::{compose, compose_pipeline, ExecutionEngine, ExecutionEvent, StepLibrary};
pub use process::{CommandLine, ProcessError, ProcessInvoker, SystemInvoker};
pub use snapshot::{ProjectSnapshotArtifacts, SnapshotArtifacts};
