//! Step domain model

use crate::core::options::Platform;
use crate::process::{ProcessError, VersionError};
use crate::snapshot::SnapshotError;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// The kinds of work a build pipeline is made of
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepKind {
    /// `<cli> prepare <platform>`
    Prepare,
    /// `<cli> clean-app <platform>`
    CleanApp,
    /// Remove snapshot artifacts from a previous build
    CleanSnapshotArtifacts,
    /// Manual gradle clean for old CLIs or minified bundles (android only)
    CleanBuildArtifacts,
    /// Run the bundler
    Bundle,
    /// Copy generated snapshot blobs into the platform project
    InstallSnapshotArtifacts,
    /// `<cli> <command> <platform>`; always last
    RunCommand { command: String, platform: Platform },
}

impl StepKind {
    /// Short identifier used in logs and events
    pub fn id(&self) -> &'static str {
        match self {
            StepKind::Prepare => "prepare",
            StepKind::CleanApp => "clean-app",
            StepKind::CleanSnapshotArtifacts => "clean-snapshot-artifacts",
            StepKind::CleanBuildArtifacts => "clean-build-artifacts",
            StepKind::Bundle => "bundle",
            StepKind::InstallSnapshotArtifacts => "install-snapshot-artifacts",
            StepKind::RunCommand { .. } => "run-command",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::RunCommand { command, platform } => {
                write!(f, "run({}, {})", command, platform)
            }
            other => f.write_str(other.id()),
        }
    }
}

/// Failure of a single step; aborts the whole pipeline
#[derive(Debug, Error)]
pub enum StepError {
    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl StepError {
    /// Exit code the whole program should end with
    ///
    /// The failing child's code when it was non-zero, otherwise 1.
    pub fn exit_code(&self) -> i32 {
        let code = match self {
            StepError::Process(e) => e.code(),
            StepError::Version(VersionError::Probe(e)) => e.code(),
            _ => None,
        };
        match code {
            Some(code) if code != 0 => code,
            _ => 1,
        }
    }

    /// The message followed by every underlying cause
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}

/// A zero-argument unit of deferred work
///
/// Steps carry everything they need; the runner only decides when they start.
#[async_trait]
pub trait Step: Send + Sync {
    /// Display name for logs and events
    fn name(&self) -> String;

    /// Do the work
    async fn run(&self) -> Result<(), StepError>;
}
