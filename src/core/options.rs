//! Build options resolved from classified flags

use crate::core::flags::Flag;
use std::fmt;
use thiserror::Error;

/// Target platform of the build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    Ios,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invalid flag combinations; all of them abort before any step runs
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("No flags provided.")]
    NoFlags,

    #[error("Could not read the recorded npm arguments")]
    RecordedArguments(#[source] serde_json::Error),

    #[error("You cannot use both --android and --ios flags!")]
    ConflictingPlatforms,

    #[error("You must provide a target platform! Use either --android, or --ios flag.")]
    MissingPlatform,

    #[error("You can't use {} together!", .0.join(", "))]
    ConflictingCommands(Vec<String>),
}

/// Structured options for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Target platform
    pub platform: Platform,

    /// CLI command to run last (`build` from `--build-app`)
    pub command: Option<String>,

    /// Bundler environment flags, in the order given
    pub env: Vec<String>,

    /// Whether the bundling steps run
    pub bundle: bool,

    /// `--uglify` given on the command line
    pub uglify: bool,

    /// `--snapshot` given on the command line
    pub snapshot: bool,

    /// Tokens forwarded to the CLI invocations
    pub passthrough: Vec<String>,
}

impl BuildOptions {
    /// Resolve options from classified flags
    pub fn resolve(flags: &[Flag]) -> Result<Self, OptionsError> {
        let platform = resolve_platform(flags)?;
        let command = resolve_command(flags)?;

        let env = flags
            .iter()
            .filter_map(|flag| match flag {
                Flag::Env(env) => Some(env.clone()),
                _ => None,
            })
            .collect();

        let passthrough = flags
            .iter()
            .filter_map(|flag| match flag {
                Flag::Passthrough(token) => Some(token.clone()),
                _ => None,
            })
            .collect();

        Ok(BuildOptions {
            platform,
            command,
            env,
            bundle: !flags.contains(&Flag::NoBundle),
            uglify: flags.contains(&Flag::Uglify),
            snapshot: flags.contains(&Flag::Snapshot),
            passthrough,
        })
    }

    /// Resolve options from bare flag names such as `["android", "build-app"]`
    ///
    /// Names that mean nothing to the pipeline are ignored.
    pub fn from_flag_names<S: AsRef<str>>(names: &[S]) -> Result<Self, OptionsError> {
        let flags: Vec<Flag> = names
            .iter()
            .filter_map(|name| Flag::from_name(name.as_ref()))
            .collect();
        Self::resolve(&flags)
    }
}

fn resolve_platform(flags: &[Flag]) -> Result<Platform, OptionsError> {
    let android = flags.contains(&Flag::Platform(Platform::Android));
    let ios = flags.contains(&Flag::Platform(Platform::Ios));

    match (android, ios) {
        (true, true) => Err(OptionsError::ConflictingPlatforms),
        (true, false) => Ok(Platform::Android),
        (false, true) => Ok(Platform::Ios),
        (false, false) => Err(OptionsError::MissingPlatform),
    }
}

fn resolve_command(flags: &[Flag]) -> Result<Option<String>, OptionsError> {
    let commands: Vec<&Flag> = flags
        .iter()
        .filter(|flag| matches!(flag, Flag::AppCommand(_)))
        .collect();

    match commands.as_slice() {
        [] => Ok(None),
        [Flag::AppCommand(command)] => Ok(Some(command.clone())),
        _ => Err(OptionsError::ConflictingCommands(
            commands.iter().map(|flag| flag.name()).collect(),
        )),
    }
}
