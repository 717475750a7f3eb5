//! Flag classification
//!
//! Raw argument tokens are classified into typed [`Flag`] variants before the
//! option resolver sees them, so no business logic matches on strings.

use crate::core::options::Platform;

/// Package-runner tokens that belong to the invocation itself (`npm run ns-bundle`)
const RUNNER_TOKENS: &[&str] = &["run", "ns-bundle"];

/// Suffix marking a CLI command flag (`build-app`, `start-app`, ...)
const COMMAND_SUFFIX: &str = "-app";

/// Substring marking a bundler environment flag
const ENV_MARKER: &str = "env.";

/// A classified argument token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flag {
    /// `--android` or `--ios`
    Platform(Platform),

    /// `--<name>-app`, carrying `<name>`
    AppCommand(String),

    /// A flag containing `env.`, kept verbatim without the leading marker
    Env(String),

    /// `--uglify`
    Uglify,

    /// `--snapshot`
    Snapshot,

    /// `--nobundle`
    NoBundle,

    /// Token naming the package runner or this script
    Runner,

    /// Anything else; forwarded to the CLI untouched
    Passthrough(String),
}

impl Flag {
    /// Classify a bare flag name (no leading `--`)
    ///
    /// Returns `None` for names that carry no meaning for the pipeline.
    pub fn from_name(name: &str) -> Option<Flag> {
        let flag = match name {
            "android" => Flag::Platform(Platform::Android),
            "ios" => Flag::Platform(Platform::Ios),
            "uglify" => Flag::Uglify,
            "snapshot" => Flag::Snapshot,
            "nobundle" => Flag::NoBundle,
            _ if name.contains(ENV_MARKER) => Flag::Env(name.to_string()),
            _ => match name.strip_suffix(COMMAND_SUFFIX) {
                Some(command) if !command.is_empty() => Flag::AppCommand(command.to_string()),
                _ => return None,
            },
        };
        Some(flag)
    }

    /// Classify a raw token as it appears on the command line
    pub fn classify(token: &str) -> Flag {
        match token.strip_prefix("--") {
            Some(name) => {
                Flag::from_name(name).unwrap_or_else(|| Flag::Passthrough(token.to_string()))
            }
            None if RUNNER_TOKENS.contains(&token) => Flag::Runner,
            None => Flag::Passthrough(token.to_string()),
        }
    }

    /// The flag name as the user wrote it, without the leading marker
    pub fn name(&self) -> String {
        match self {
            Flag::Platform(platform) => platform.to_string(),
            Flag::AppCommand(command) => format!("{}{}", command, COMMAND_SUFFIX),
            Flag::Env(env) => env.clone(),
            Flag::Uglify => "uglify".to_string(),
            Flag::Snapshot => "snapshot".to_string(),
            Flag::NoBundle => "nobundle".to_string(),
            Flag::Runner => String::new(),
            Flag::Passthrough(token) => token.clone(),
        }
    }
}

/// Classify every token, preserving order
pub fn classify_all<I, S>(tokens: I) -> Vec<Flag>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tokens
        .into_iter()
        .map(|token| Flag::classify(token.as_ref()))
        .collect()
}
