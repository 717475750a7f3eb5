//! Pipeline composition and execution

pub mod composer;
pub mod engine;
pub mod steps;

pub use composer::{compose, compose_pipeline};
pub use engine::{EventHandler, ExecutionEngine, ExecutionEvent};
pub use steps::{BuildStep, StepLibrary};
