//! Where the pipeline flags come from

use crate::core::OptionsError;
use serde::Deserialize;

/// Argument vector npm records for the running script
pub const NPM_ARGV_VAR: &str = "npm_config_argv";

#[derive(Debug, Deserialize)]
struct RecordedArgv {
    original: Vec<String>,
}

/// Parse the `original` tokens out of an `npm_config_argv` value
pub fn parse_recorded_argv(json: &str) -> Result<Vec<String>, OptionsError> {
    serde_json::from_str::<RecordedArgv>(json)
        .map(|argv| argv.original)
        .map_err(OptionsError::RecordedArguments)
}

/// Flags given on the command line win; otherwise fall back to the tokens
/// npm recorded, and fail when neither exists
pub fn pipeline_tokens(explicit: &[String], recorded: Option<&str>) -> Result<Vec<String>, OptionsError> {
    if !explicit.is_empty() {
        return Ok(explicit.to_vec());
    }

    match recorded {
        Some(json) => parse_recorded_argv(json),
        None => Err(OptionsError::NoFlags),
    }
}
