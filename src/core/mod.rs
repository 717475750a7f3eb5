//! Core domain models
//!
//! Flags, build options, the immutable build context, and the step and
//! pipeline types the execution engine works on.

pub mod config;
pub mod context;
pub mod flags;
pub mod options;
pub mod pipeline;
pub mod state;
pub mod step;

pub use config::ToolConfig;
pub use context::{BuildContext, BuildEnvironment, HostOs};
pub use flags::Flag;
pub use options::{BuildOptions, OptionsError, Platform};
pub use pipeline::*;
pub use state::*;
pub use step::*;
