//! Build context - immutable inputs shared by every step

use crate::core::{
    config::ToolConfig,
    options::{BuildOptions, Platform},
};
use std::path::{Path, PathBuf};

/// Minification toggle set by `npm run ... --uglify`
pub const UGLIFY_VAR: &str = "npm_config_uglify";

/// Snapshot toggle set by `npm run ... --snapshot`
pub const SNAPSHOT_VAR: &str = "npm_config_snapshot";

/// `platforms/android` inside a project; the native android project lives here
pub fn android_platform_dir(project_dir: &Path) -> PathBuf {
    project_dir.join("platforms").join("android")
}

/// Host operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOs {
    Windows,
    Unix,
}

impl HostOs {
    /// The OS this binary was compiled for
    pub fn current() -> Self {
        if cfg!(windows) {
            HostOs::Windows
        } else {
            HostOs::Unix
        }
    }
}

/// Environment conditions captured once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildEnvironment {
    pub host_os: HostOs,

    /// Minification requested through the environment
    pub uglify: bool,

    /// Snapshot generation requested through the environment
    pub snapshot: bool,
}

impl BuildEnvironment {
    /// Capture the toggles from the process environment
    pub fn capture() -> Self {
        Self::from_lookup(HostOs::current(), |key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(host_os: HostOs, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            host_os,
            uglify: toggle_enabled(lookup(UGLIFY_VAR)),
            snapshot: toggle_enabled(lookup(SNAPSHOT_VAR)),
        }
    }
}

impl Default for BuildEnvironment {
    fn default() -> Self {
        Self {
            host_os: HostOs::current(),
            uglify: false,
            snapshot: false,
        }
    }
}

/// npm writes `true` for a bare flag and `false` for `--no-<flag>`
fn toggle_enabled(value: Option<String>) -> bool {
    match value {
        Some(value) => {
            let value = value.trim();
            !(value.is_empty() || value.eq_ignore_ascii_case("false") || value == "0")
        }
        None => false,
    }
}

/// Everything a pipeline run needs to know, fixed before composition
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Root of the app project
    pub project_dir: PathBuf,

    /// Resolved flags
    pub options: BuildOptions,

    /// Environment toggles and host
    pub environment: BuildEnvironment,

    /// External programs
    pub tools: ToolConfig,
}

impl BuildContext {
    pub fn new(
        project_dir: PathBuf,
        options: BuildOptions,
        environment: BuildEnvironment,
        tools: ToolConfig,
    ) -> Self {
        Self {
            project_dir,
            options,
            environment,
            tools,
        }
    }

    pub fn platform(&self) -> Platform {
        self.options.platform
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    /// Whether the bundle is minified
    pub fn should_uglify(&self) -> bool {
        self.environment.uglify || self.options.uglify
    }

    /// Snapshots are only generated for android on non-Windows hosts
    pub fn should_snapshot(&self) -> bool {
        self.platform() == Platform::Android
            && self.environment.host_os != HostOs::Windows
            && (self.environment.snapshot || self.options.snapshot)
    }

    /// `platforms/android` inside the project
    pub fn android_platform_dir(&self) -> PathBuf {
        android_platform_dir(&self.project_dir)
    }
}
