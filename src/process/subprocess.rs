//! Subprocess invoker backed by tokio

use crate::process::{CommandLine, ProcessError, ProcessInvoker, ProcessOutcome, StdioMode};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Runs commands as real child processes
///
/// There is no timeout: a child that never exits keeps the pipeline waiting
/// until it is interrupted from the terminal.
#[derive(Debug, Clone, Default)]
pub struct SystemInvoker;

impl SystemInvoker {
    pub fn new() -> Self {
        Self
    }

    /// Look the program up on PATH (this also finds `.cmd` shims on Windows)
    fn resolve_program(program: &str) -> PathBuf {
        match which::which(program) {
            Ok(path) => path,
            Err(e) => {
                debug!("Could not resolve {} on PATH ({}), spawning as given", program, e);
                PathBuf::from(program)
            }
        }
    }
}

#[async_trait]
impl ProcessInvoker for SystemInvoker {
    async fn spawn(&self, command: &CommandLine, stdio: StdioMode) -> Result<ProcessOutcome, ProcessError> {
        debug!("Spawning {}", command);

        let mut cmd = Command::new(Self::resolve_program(&command.program));
        cmd.args(&command.args)
            .stdin(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir);
        }

        let spawn_error = |source| ProcessError::Spawn {
            program: command.program.clone(),
            source,
        };

        let outcome = match stdio {
            StdioMode::Inherit => {
                let status = cmd.stdout(Stdio::inherit()).status().await.map_err(spawn_error)?;
                ProcessOutcome {
                    exit_code: status.code(),
                    stdout: None,
                }
            }
            StdioMode::CaptureStdout => {
                let output = cmd.stdout(Stdio::piped()).output().await.map_err(spawn_error)?;
                let stdout =
                    String::from_utf8(output.stdout).map_err(|_| ProcessError::InvalidOutput)?;
                ProcessOutcome {
                    exit_code: output.status.code(),
                    stdout: Some(stdout),
                }
            }
        };

        if !outcome.success() {
            warn!("{} exited with {:?}", command.program, outcome.exit_code);
        }

        Ok(outcome)
    }
}
