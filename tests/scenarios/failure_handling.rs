//! Test: Failure Handling - the first failing step ends the run

use crate::helpers::*;
use ns_bundle::core::ExecutionStatus;
use ns_bundle::process::VersionError;
use ns_bundle::snapshot::SnapshotError;
use ns_bundle::{ExecutionEvent, StepError};

#[tokio::test]
async fn test_bundler_failure_stops_the_build() {
    let context = build_context(&fake_project(), &["android", "build-app"], unix_env(false, false));
    let run = run_build(context, |invoker| invoker.failing_on("webpack", 2), |s| s).await;

    assert_pipeline_failed_at(&run, "bundle");
    let err = run.result.as_ref().unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert_eq!(err.to_string(), "child process exited with code 2");

    // nothing after the bundler started
    assert_eq!(
        run.journal.entries().last().map(String::as_str),
        Some("webpack --config=webpack.config.js --progress --env.android")
    );
    assert!(run.journal.runs_of("tns").iter().all(|entry| !entry.starts_with("tns build")));
}

#[tokio::test]
async fn test_prepare_failure_runs_nothing_else() {
    let context = build_context(&fake_project(), &["ios", "build-app"], unix_env(false, false));
    let run = run_build(context, |invoker| invoker.failing_on("prepare", 1), |s| s).await;

    assert_pipeline_failed_at(&run, "prepare");
    assert_eq!(run.journal.entries().len(), 1);
    assert_eq!(run.pipeline.state.completed_steps, 0);
}

#[tokio::test]
async fn test_failed_event_carries_exit_code() {
    let context = build_context(&fake_project(), &["ios", "nobundle", "build-app"], unix_env(false, false));
    let run = run_build(context, |invoker| invoker.failing_on("build", 65), |s| s).await;

    assert_pipeline_failed_at(&run, "run(build, ios)");
    assert!(run.events.iter().any(|event| matches!(
        event,
        ExecutionEvent::StepFailed { index: 1, exit_code: 65, error, .. }
            if error == "child process exited with code 65"
    )));
    assert!(matches!(
        run.events.last(),
        Some(ExecutionEvent::PipelineCompleted { status: ExecutionStatus::Failed, .. })
    ));
}

#[tokio::test]
async fn test_clean_app_failure_stops_before_cleaning_snapshots() {
    let context = build_context(&fake_project(), &["android"], unix_env(false, false));
    let run = run_build(context, |invoker| invoker.failing_on("clean-app", 3), |s| s).await;

    assert_pipeline_failed_at(&run, "clean-app");
    assert!(!run.journal.entries().contains(&"snapshot:clean".to_string()));
}

#[tokio::test]
async fn test_missing_snapshot_blobs_fail_with_code_one() {
    let context = build_context(&fake_project(), &["android", "build-app"], unix_env(false, true));
    let run = run_build(context, |invoker| invoker, |snapshots| snapshots.without_blobs()).await;

    assert_pipeline_failed_at(&run, "install-snapshot-artifacts");
    let err = run.result.as_ref().unwrap_err();
    assert!(matches!(err, StepError::Snapshot(SnapshotError::MissingBlobs(_))));
    assert_eq!(err.exit_code(), 1);
    assert!(run.journal.runs_of("tns").iter().all(|entry| !entry.starts_with("tns build")));
}

#[tokio::test]
async fn test_version_probe_failure_propagates_code() {
    let context = build_context(&fake_project(), &["android", "build-app"], unix_env(false, false));
    let run = run_build(context, |invoker| invoker.failing_on("--version", 127), |s| s).await;

    assert_pipeline_failed_at(&run, "clean-build-artifacts");
    let err = run.result.as_ref().unwrap_err();
    assert!(matches!(err, StepError::Version(VersionError::Probe(_))));
    assert_eq!(err.exit_code(), 127);
    assert!(run.journal.runs_of("webpack").is_empty());
}
