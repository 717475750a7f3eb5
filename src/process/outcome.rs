//! Command lines, process outcomes and the shared failure vocabulary

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error types for external process invocations
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("failed to start {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("child process exited with code {code}")]
    Exited { code: i32 },

    #[error("child process was terminated by a signal")]
    Terminated,

    #[error("child process output is not valid UTF-8")]
    InvalidOutput,
}

impl ProcessError {
    /// Exit code observed from the child, if it exited normally
    pub fn code(&self) -> Option<i32> {
        match self {
            ProcessError::Exited { code } => Some(*code),
            _ => None,
        }
    }
}

/// A program plus its arguments, each passed to the OS as a separate token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

/// Renders every token individually quoted, as it would be typed in a shell
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(token: &str) -> String {
    format!("\"{}\"", token.replace('"', "\\\""))
}

/// What came back from a finished child process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// `None` when the process was killed by a signal
    pub exit_code: Option<i32>,

    /// Standard output, when it was collected
    pub stdout: Option<String>,
}

impl ProcessOutcome {
    pub fn exited(exit_code: i32) -> Self {
        Self {
            exit_code: Some(exit_code),
            stdout: None,
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = Some(stdout.into());
        self
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Exit code 0 becomes the collected output, anything else a failure
    pub fn into_result(self) -> Result<Option<String>, ProcessError> {
        match self.exit_code {
            Some(0) => Ok(self.stdout),
            Some(code) => Err(ProcessError::Exited { code }),
            None => Err(ProcessError::Terminated),
        }
    }
}
