//! External process invocation
//!
//! Every tool the pipeline drives (the mobile-app CLI, the bundler, gradle)
//! goes through [`ProcessInvoker`], so all of them share one failure
//! vocabulary: [`ProcessError`].

pub mod outcome;
pub mod subprocess;
pub mod version;

use async_trait::async_trait;
pub use outcome::{CommandLine, ProcessError, ProcessOutcome};
pub use subprocess::SystemInvoker;
pub use version::{is_version_gte, parse_version, probe_version, VersionError, MANUAL_CLEAN_THRESHOLD};

/// How the child's standard streams are connected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdioMode {
    /// stdin, stdout and stderr all belong to the controlling terminal
    Inherit,
    /// stdout is collected, stdin and stderr stay on the terminal
    CaptureStdout,
}

/// Trait for process execution - allows swapping the OS for a recorder in tests
#[async_trait]
pub trait ProcessInvoker: Send + Sync {
    /// Spawn the command and wait for it to exit
    ///
    /// Only failures to start the process are errors here; the exit code is
    /// reported in the outcome.
    async fn spawn(&self, command: &CommandLine, stdio: StdioMode) -> Result<ProcessOutcome, ProcessError>;

    /// Run attached to the terminal; succeed only on exit code 0
    async fn invoke(&self, command: &CommandLine) -> Result<(), ProcessError> {
        self.spawn(command, StdioMode::Inherit)
            .await?
            .into_result()
            .map(|_| ())
    }

    /// Run with stdout collected; succeed only on exit code 0
    async fn capture_stdout(&self, command: &CommandLine) -> Result<String, ProcessError> {
        let output = self
            .spawn(command, StdioMode::CaptureStdout)
            .await?
            .into_result()?;
        Ok(output.unwrap_or_default())
    }
}
