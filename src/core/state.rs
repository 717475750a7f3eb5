//! Execution state models

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Overall pipeline execution status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    /// Pipeline has not started
    Pending,
    /// A step is currently running
    Running,
    /// Every step completed
    Completed,
    /// A step failed; later steps never started
    Failed,
}

/// Overall pipeline state
#[derive(Debug, Clone)]
pub struct PipelineState {
    /// Unique execution ID
    pub execution_id: Uuid,

    /// Current execution status
    pub status: ExecutionStatus,

    /// When execution started
    pub started_at: Option<DateTime<Utc>>,

    /// When execution completed/failed
    pub completed_at: Option<DateTime<Utc>>,

    /// Total number of steps
    pub total_steps: usize,

    /// Number of completed steps
    pub completed_steps: usize,

    /// Position of the step that failed
    pub failed_step: Option<usize>,
}

impl PipelineState {
    /// Create a new pipeline state
    pub fn new() -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            status: ExecutionStatus::Pending,
            started_at: None,
            completed_at: None,
            total_steps: 0,
            completed_steps: 0,
            failed_step: None,
        }
    }

    /// Mark pipeline as started
    pub fn start(&mut self, total_steps: usize) {
        self.status = ExecutionStatus::Running;
        self.started_at = Some(Utc::now());
        self.total_steps = total_steps;
    }

    /// Record that the running step finished
    pub fn step_completed(&mut self) {
        self.completed_steps += 1;
    }

    /// Mark pipeline as completed
    pub fn complete(&mut self) {
        self.status = ExecutionStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    /// Mark pipeline as failed at `index`
    pub fn fail(&mut self, index: usize) {
        self.status = ExecutionStatus::Failed;
        self.failed_step = Some(index);
        self.completed_at = Some(Utc::now());
    }

    /// Wall-clock time between start and completion or failure
    pub fn elapsed(&self) -> Option<Duration> {
        Some(self.completed_at? - self.started_at?)
    }
}

impl Default for PipelineState {
    fn default() -> Self {
        Self::new()
    }
}
