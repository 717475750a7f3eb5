//! Mobile-app CLI version probe

use crate::process::{CommandLine, ProcessError, ProcessInvoker};
use regex::Regex;
use semver::Version;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

/// CLI versions from this one on clean the android build themselves
pub const MANUAL_CLEAN_THRESHOLD: Version = Version::new(3, 0, 1);

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.(\d+)\.(\d+)").expect("version pattern compiles"));

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("could not query the CLI version")]
    Probe(#[from] ProcessError),

    #[error("could not find a version number in {0:?}")]
    Unrecognized(String),

    #[error("version component out of range in {0:?}")]
    OutOfRange(String),
}

/// Extract the first `major.minor.patch` triple from free-form output
pub fn parse_version(output: &str) -> Result<Version, VersionError> {
    let captures = VERSION_PATTERN
        .captures(output)
        .ok_or_else(|| VersionError::Unrecognized(output.trim().to_string()))?;

    let component = |i: usize| {
        captures[i]
            .parse::<u64>()
            .map_err(|_| VersionError::OutOfRange(output.trim().to_string()))
    };

    Ok(Version::new(component(1)?, component(2)?, component(3)?))
}

/// `version >= reference`; equal versions satisfy it
pub fn is_version_gte(version: &Version, reference: &Version) -> bool {
    version >= reference
}

/// Run `<cli> --version` and parse what it prints
pub async fn probe_version(
    invoker: &dyn ProcessInvoker,
    command: &CommandLine,
) -> Result<Version, VersionError> {
    let output = invoker.capture_stdout(command).await?;
    let version = parse_version(&output)?;
    debug!("{} reports version {}", command.program, version);
    Ok(version)
}
