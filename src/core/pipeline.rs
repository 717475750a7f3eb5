//! Pipeline domain model

use crate::core::{
    state::{ExecutionStatus, PipelineState},
    step::Step,
};

/// An ordered list of steps plus its execution state
///
/// Steps are never re-ordered once placed; their identity is their position.
pub struct Pipeline {
    /// Pipeline name
    pub name: String,

    /// Pipeline steps, in execution order
    steps: Vec<Box<dyn Step>>,

    /// Execution state
    pub state: PipelineState,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
            state: PipelineState::new(),
        }
    }

    /// Append a step after every step already present
    pub fn push<S: Step + 'static>(&mut self, step: S) {
        self.steps.push(Box::new(step));
    }

    /// Builder form of [`Pipeline::push`]
    pub fn with_step<S: Step + 'static>(mut self, step: S) -> Self {
        self.push(step);
        self
    }

    /// Steps and state borrowed together, for the runner
    pub fn parts_mut(&mut self) -> (&[Box<dyn Step>], &mut PipelineState) {
        (&self.steps, &mut self.state)
    }

    pub fn step_names(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Check if pipeline is complete
    pub fn is_complete(&self) -> bool {
        self.state.status == ExecutionStatus::Completed
    }

    /// Check if pipeline has failed
    pub fn has_failed(&self) -> bool {
        self.state.status == ExecutionStatus::Failed
    }

    /// Name of the step the pipeline failed at
    pub fn failed_step_name(&self) -> Option<String> {
        self.state
            .failed_step
            .and_then(|index| self.steps.get(index))
            .map(|step| step.name())
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("steps", &self.step_names())
            .field("state", &self.state)
            .finish()
    }
}
