//! Test: Snapshot - when snapshot artifacts are installed

use crate::helpers::*;
use ns_bundle::core::HostOs;
use ns_bundle::snapshot::ProjectSnapshotArtifacts;
use ns_bundle::{compose_pipeline, BuildEnvironment, ExecutionEngine, StepLibrary};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[tokio::test]
async fn test_install_between_bundle_and_build() {
    let context = build_context(&fake_project(), &["android", "build-app"], unix_env(false, true));
    let run = run_default(context).await;

    assert_pipeline_completed(&run);
    let entries = run.journal.entries();
    assert_eq!(
        entries[entries.len() - 3..],
        [
            "webpack --config=webpack.config.js --progress --env.android --env.snapshot",
            "snapshot:install",
            "tns build android --bundle --disable-npm-install",
        ]
    );
}

#[tokio::test]
async fn test_snapshot_flag_counts_like_the_environment() {
    let context = build_context(&fake_project(), &["android", "snapshot"], unix_env(false, false));
    let run = run_default(context).await;

    assert_pipeline_completed(&run);
    assert_eq!(
        run.journal.entries().last().map(String::as_str),
        Some("snapshot:install")
    );
}

#[tokio::test]
async fn test_no_snapshot_on_windows_hosts() {
    let environment = BuildEnvironment {
        host_os: HostOs::Windows,
        uglify: false,
        snapshot: true,
    };
    let context = build_context(&fake_project(), &["android", "build-app"], environment);
    let run = run_default(context).await;

    assert_pipeline_completed(&run);
    assert!(!run.journal.entries().contains(&"snapshot:install".to_string()));
    assert!(run
        .journal
        .runs_of("webpack")
        .iter()
        .all(|entry| !entry.contains("--env.snapshot")));
}

#[tokio::test]
async fn test_no_snapshot_for_ios() {
    let context = build_context(&fake_project(), &["ios", "build-app"], unix_env(false, true));
    let run = run_default(context).await;

    assert_pipeline_completed(&run);
    assert!(!run.journal.entries().contains(&"snapshot:install".to_string()));
}

#[tokio::test]
async fn test_install_without_bundling() {
    let context = build_context(
        &fake_project(),
        &["android", "nobundle", "build-app"],
        unix_env(false, true),
    );
    let run = run_default(context).await;

    assert_pipeline_completed(&run);
    assert_eq!(
        run.journal.entries(),
        vec![
            "tns prepare android --bundle --disable-npm-install",
            "snapshot:install",
            "tns build android --bundle --disable-npm-install",
        ]
    );
}

#[tokio::test]
async fn test_blobs_land_in_app_assets() {
    let project = TempDir::new().unwrap();
    let platform_dir = project.path().join("platforms").join("android");
    let blobs = platform_dir.join("snapshot-build").join("snapshots").join("blobs");
    fs::create_dir_all(blobs.join("x86")).unwrap();
    fs::write(blobs.join("x86").join("snapshot.blob"), b"blob").unwrap();

    // left over from the previous snapshot build
    let assets = platform_dir.join("src").join("main").join("assets");
    fs::create_dir_all(assets.join("snapshots").join("arm")).unwrap();

    let context = build_context(project.path(), &["android"], unix_env(false, true));
    let journal = Journal::default();
    let library = Arc::new(StepLibrary::new(
        Arc::new(context),
        Arc::new(MockInvoker::new(journal.clone())),
        Arc::new(ProjectSnapshotArtifacts::new()),
    ));

    let mut pipeline = compose_pipeline(library);
    ExecutionEngine::new().execute(&mut pipeline).await.unwrap();

    assert!(pipeline.is_complete());
    assert_eq!(
        fs::read(assets.join("snapshots").join("x86").join("snapshot.blob")).unwrap(),
        b"blob"
    );
    assert!(!assets.join("snapshots").join("arm").exists());
}
