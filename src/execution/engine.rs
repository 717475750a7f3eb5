//! Sequential runner - runs steps in order and stops at the first failure

use crate::core::{ExecutionStatus, Pipeline, PipelineState, StepError};
use chrono::Duration;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Events that can occur during pipeline execution
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    PipelineStarted {
        execution_id: Uuid,
        pipeline_name: String,
        total_steps: usize,
    },
    StepStarted {
        index: usize,
        step: String,
    },
    StepCompleted {
        index: usize,
        step: String,
    },
    StepFailed {
        index: usize,
        step: String,
        error: String,
        exit_code: i32,
    },
    PipelineCompleted {
        execution_id: Uuid,
        status: ExecutionStatus,
        completed_steps: usize,
        total_steps: usize,
        elapsed: Option<Duration>,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(ExecutionEvent) + Send + Sync>;

/// Runs a pipeline's steps strictly one after another
///
/// Each step starts only after its predecessor succeeded. The first failure
/// is recorded in the pipeline state and returned; nothing after it starts.
#[derive(Default)]
pub struct ExecutionEngine {
    event_handlers: Vec<EventHandler>,
}

impl ExecutionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    /// Emit an event to all handlers
    fn emit_event(&self, event: ExecutionEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    fn emit_finished(&self, state: &PipelineState) {
        self.emit_event(ExecutionEvent::PipelineCompleted {
            execution_id: state.execution_id,
            status: state.status,
            completed_steps: state.completed_steps,
            total_steps: state.total_steps,
            elapsed: state.elapsed(),
        });
    }

    /// Execute the entire pipeline
    pub async fn execute(&self, pipeline: &mut Pipeline) -> Result<(), StepError> {
        let execution_id = pipeline.state.execution_id;
        let pipeline_name = pipeline.name.clone();
        let total_steps = pipeline.len();

        info!("Starting pipeline execution: {} ({})", pipeline_name, execution_id);
        self.emit_event(ExecutionEvent::PipelineStarted {
            execution_id,
            pipeline_name: pipeline_name.clone(),
            total_steps,
        });

        let (steps, state) = pipeline.parts_mut();
        state.start(total_steps);

        for (index, step) in steps.iter().enumerate() {
            let name = step.name();
            info!("Step {}/{}: {}", index + 1, total_steps, name);
            self.emit_event(ExecutionEvent::StepStarted {
                index,
                step: name.clone(),
            });

            if let Err(e) = step.run().await {
                error!("Step {} failed: {}", name, e.report());
                state.fail(index);
                self.emit_event(ExecutionEvent::StepFailed {
                    index,
                    step: name,
                    error: e.report(),
                    exit_code: e.exit_code(),
                });
                self.emit_finished(state);
                return Err(e);
            }

            state.step_completed();
            self.emit_event(ExecutionEvent::StepCompleted { index, step: name });
        }

        state.complete();
        info!("Pipeline execution finished: {}", pipeline_name);
        self.emit_finished(state);

        Ok(())
    }
}
