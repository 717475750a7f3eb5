//! Command-line interface

pub mod args;
pub mod output;

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

/// Bundle a mobile app and drive its CLI in one pipeline
#[derive(Debug, Parser, Clone)]
#[command(name = "ns-bundle")]
#[command(version)]
#[command(about = "Sequences the mobile-app CLI, the bundler and snapshot steps into one build", long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// App project directory (defaults to the current directory)
    #[arg(long, env = "NS_BUNDLE_PROJECT_DIR")]
    pub project_dir: Option<PathBuf>,

    /// Tool configuration file (defaults to nsbundle.yaml in the project)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print the composed steps without running anything
    #[arg(long)]
    pub dry_run: bool,

    /// Pipeline flags such as --android --build-app --env.aot; read from
    /// npm_config_argv when omitted
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "FLAGS")]
    pub flags: Vec<String>,
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
