//! Step library - what each build step actually does

use crate::{
    core::{BuildContext, HostOs, Platform, Step, StepError, StepKind},
    process::{is_version_gte, probe_version, CommandLine, ProcessInvoker, MANUAL_CLEAN_THRESHOLD},
    snapshot::SnapshotArtifacts,
};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Flags every CLI invocation of a bundled build carries
const CLI_BUNDLE_FLAGS: [&str; 2] = ["--bundle", "--disable-npm-install"];

/// Executes steps against one build context
pub struct StepLibrary {
    context: Arc<BuildContext>,
    invoker: Arc<dyn ProcessInvoker>,
    snapshots: Arc<dyn SnapshotArtifacts>,
}

impl StepLibrary {
    pub fn new(
        context: Arc<BuildContext>,
        invoker: Arc<dyn ProcessInvoker>,
        snapshots: Arc<dyn SnapshotArtifacts>,
    ) -> Self {
        Self {
            context,
            invoker,
            snapshots,
        }
    }

    pub fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Run one step
    pub async fn run(&self, kind: &StepKind) -> Result<(), StepError> {
        match kind {
            StepKind::Prepare => self.run_cli("prepare").await,
            StepKind::CleanApp => self.clean_app().await,
            StepKind::CleanSnapshotArtifacts => self.clean_snapshot_artifacts(),
            StepKind::CleanBuildArtifacts => self.clean_build_artifacts().await,
            StepKind::Bundle => self.bundle().await,
            StepKind::InstallSnapshotArtifacts => self.install_snapshot_artifacts(),
            StepKind::RunCommand { command, .. } => self.run_cli(command).await,
        }
    }

    async fn run_cli(&self, command: &str) -> Result<(), StepError> {
        info!("Running {} {}...", self.context.tools.cli, command);
        self.invoker.invoke(&self.cli_command(command)).await?;
        Ok(())
    }

    async fn clean_app(&self) -> Result<(), StepError> {
        info!("Cleaning {} app output...", self.context.platform());
        self.invoker.invoke(&self.clean_app_command()).await?;
        Ok(())
    }

    fn clean_snapshot_artifacts(&self) -> Result<(), StepError> {
        self.snapshots.clean(self.context.project_dir())?;
        Ok(())
    }

    /// Newer CLIs clean the android build themselves, except that a minified
    /// bundle invalidates their cache
    async fn clean_build_artifacts(&self) -> Result<(), StepError> {
        if self.context.platform() != Platform::Android {
            debug!("No build artifacts to clean for {}", self.context.platform());
            return Ok(());
        }

        let version = probe_version(self.invoker.as_ref(), &self.version_command()).await?;
        let uglify = self.context.should_uglify();

        if is_version_gte(&version, &MANUAL_CLEAN_THRESHOLD) && !uglify {
            debug!("{} {} cleans the android build itself", self.context.tools.cli, version);
            return Ok(());
        }

        info!(
            "Cleaning android build artifacts ({} {}, uglify: {})",
            self.context.tools.cli, version, uglify
        );
        self.gradle_clean().await
    }

    async fn gradle_clean(&self) -> Result<(), StepError> {
        let gradlew = self.gradlew_path();
        if !gradlew.exists() {
            info!("{} not found, skipping gradle clean", gradlew.display());
            return Ok(());
        }
        self.invoker.invoke(&self.gradle_clean_command()).await?;
        Ok(())
    }

    async fn bundle(&self) -> Result<(), StepError> {
        info!(
            "Running {} for {}...",
            self.context.tools.bundler,
            self.context.platform()
        );
        self.invoker.invoke(&self.bundler_command()).await?;
        Ok(())
    }

    fn install_snapshot_artifacts(&self) -> Result<(), StepError> {
        self.snapshots.install(self.context.project_dir())?;
        Ok(())
    }

    fn project_command(&self, program: &str) -> CommandLine {
        CommandLine::new(program).current_dir(self.context.project_dir())
    }

    /// `<cli> <command> <platform> --bundle --disable-npm-install <passthrough...>`
    pub fn cli_command(&self, command: &str) -> CommandLine {
        self.project_command(&self.context.tools.cli)
            .arg(command)
            .arg(self.context.platform().as_str())
            .args(CLI_BUNDLE_FLAGS)
            .args(self.context.options.passthrough.iter().cloned())
    }

    /// `<cli> clean-app <platform>`
    pub fn clean_app_command(&self) -> CommandLine {
        self.project_command(&self.context.tools.cli)
            .arg("clean-app")
            .arg(self.context.platform().as_str())
    }

    /// `<cli> --version`
    pub fn version_command(&self) -> CommandLine {
        self.project_command(&self.context.tools.cli).arg("--version")
    }

    /// Bundler invocation with platform, passthrough env flags and toggles
    pub fn bundler_command(&self) -> CommandLine {
        let mut command = self
            .project_command(&self.context.tools.bundler)
            .arg(format!("--config={}", self.context.tools.bundler_config))
            .arg("--progress")
            .arg(format!("--env.{}", self.context.platform()))
            .args(self.context.options.env.iter().map(|env| format!("--{}", env)));

        if self.context.should_uglify() {
            command = command.arg("--env.uglify");
        }
        if self.context.should_snapshot() {
            command = command.arg("--env.snapshot");
        }
        command
    }

    pub fn gradlew_path(&self) -> PathBuf {
        let wrapper = match self.context.environment.host_os {
            HostOs::Windows => "gradlew.bat",
            HostOs::Unix => "gradlew",
        };
        self.context.android_platform_dir().join(wrapper)
    }

    /// `gradlew -p platforms/android clean`
    pub fn gradle_clean_command(&self) -> CommandLine {
        let platform_dir = self.context.android_platform_dir();
        self.project_command(&self.gradlew_path().to_string_lossy())
            .arg("-p")
            .arg(platform_dir.to_string_lossy())
            .arg("clean")
    }

    /// Human-readable description of what a step would do
    pub fn describe(&self, kind: &StepKind) -> String {
        match kind {
            StepKind::Prepare => self.cli_command("prepare").to_string(),
            StepKind::CleanApp => self.clean_app_command().to_string(),
            StepKind::CleanSnapshotArtifacts => format!(
                "remove snapshot artifacts under {}",
                self.context.android_platform_dir().display()
            ),
            StepKind::CleanBuildArtifacts => match self.context.platform() {
                Platform::Android => format!(
                    "{} when {} reports a version below {}{}",
                    self.gradle_clean_command(),
                    self.version_command(),
                    MANUAL_CLEAN_THRESHOLD,
                    if self.context.should_uglify() {
                        " (always, uglify is on)"
                    } else {
                        ""
                    }
                ),
                Platform::Ios => "nothing to clean for ios".to_string(),
            },
            StepKind::Bundle => self.bundler_command().to_string(),
            StepKind::InstallSnapshotArtifacts => format!(
                "install snapshot blobs into {}",
                self.context.android_platform_dir().display()
            ),
            StepKind::RunCommand { command, .. } => self.cli_command(command).to_string(),
        }
    }
}

/// A step kind bound to the library that runs it
pub struct BuildStep {
    kind: StepKind,
    library: Arc<StepLibrary>,
}

impl BuildStep {
    pub fn new(kind: StepKind, library: Arc<StepLibrary>) -> Self {
        Self { kind, library }
    }
}

#[async_trait]
impl Step for BuildStep {
    fn name(&self) -> String {
        self.kind.to_string()
    }

    async fn run(&self) -> Result<(), StepError> {
        self.library.run(&self.kind).await
    }
}
