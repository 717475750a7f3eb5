//! Test: Version Gating - when the android build gets a manual gradle clean

use crate::helpers::*;
use ns_bundle::process::VersionError;
use ns_bundle::StepError;
use tempfile::TempDir;

fn gradle_runs(run: &BuildRun) -> Vec<String> {
    run.journal.runs_of("gradlew")
}

#[tokio::test]
async fn test_old_cli_gets_gradle_clean() {
    let project = TempDir::new().unwrap();
    install_gradle_wrapper(project.path());

    let context = build_context(project.path(), &["android", "build-app"], unix_env(false, false));
    let run = run_build(context, |invoker| invoker.with_version_output("2.5.4\n"), |s| s).await;

    assert_pipeline_completed(&run);
    assert_eq!(gradle_runs(&run).len(), 1);

    let gradle = run
        .invoker
        .commands()
        .into_iter()
        .find(|command| command.program.ends_with("gradlew"))
        .unwrap();
    assert_eq!(
        gradle.args,
        vec![
            "-p".to_string(),
            project.path().join("platforms").join("android").to_string_lossy().into_owned(),
            "clean".to_string(),
        ]
    );

    // probe, then clean, then bundle
    let entries = run.journal.entries();
    let position = |prefix: &str| entries.iter().position(|e| e.starts_with(prefix)).unwrap();
    assert!(position("tns --version") < position("gradlew"));
    assert!(position("gradlew") < position("webpack"));
}

#[tokio::test]
async fn test_new_cli_skips_gradle_clean() {
    let project = TempDir::new().unwrap();
    install_gradle_wrapper(project.path());

    let context = build_context(project.path(), &["android", "build-app"], unix_env(false, false));
    let run = run_build(context, |invoker| invoker.with_version_output("3.4.0\n"), |s| s).await;

    assert_pipeline_completed(&run);
    assert!(gradle_runs(&run).is_empty());
}

#[tokio::test]
async fn test_threshold_version_skips_gradle_clean() {
    let project = TempDir::new().unwrap();
    install_gradle_wrapper(project.path());

    let context = build_context(project.path(), &["android"], unix_env(false, false));
    let run = run_build(context, |invoker| invoker.with_version_output("3.0.1"), |s| s).await;

    assert_pipeline_completed(&run);
    assert!(gradle_runs(&run).is_empty());
}

#[tokio::test]
async fn test_uglify_forces_gradle_clean_on_new_cli() {
    let project = TempDir::new().unwrap();
    install_gradle_wrapper(project.path());

    let context = build_context(project.path(), &["android", "build-app"], unix_env(true, false));
    let run = run_build(context, |invoker| invoker.with_version_output("3.4.0\n"), |s| s).await;

    assert_pipeline_completed(&run);
    assert_eq!(gradle_runs(&run).len(), 1);
    assert_eq!(
        run.journal.runs_of("webpack"),
        vec!["webpack --config=webpack.config.js --progress --env.android --env.uglify"]
    );
}

#[tokio::test]
async fn test_uglify_flag_counts_like_the_environment() {
    let project = TempDir::new().unwrap();
    install_gradle_wrapper(project.path());

    let context = build_context(project.path(), &["android", "uglify"], unix_env(false, false));
    let run = run_default(context).await;

    assert_pipeline_completed(&run);
    assert_eq!(gradle_runs(&run).len(), 1);
}

#[tokio::test]
async fn test_missing_gradle_wrapper_is_skipped() {
    let project = TempDir::new().unwrap();

    let context = build_context(project.path(), &["android", "build-app"], unix_env(false, false));
    let run = run_build(context, |invoker| invoker.with_version_output("2.0.0"), |s| s).await;

    assert_pipeline_completed(&run);
    assert!(gradle_runs(&run).is_empty());
}

#[tokio::test]
async fn test_ios_never_probes_the_cli() {
    let context = build_context(&fake_project(), &["ios", "build-app"], unix_env(true, false));
    let run = run_default(context).await;

    assert_pipeline_completed(&run);
    assert!(run
        .journal
        .entries()
        .iter()
        .all(|entry| entry != "tns --version"));
}

#[tokio::test]
async fn test_unreadable_version_fails_the_build() {
    let context = build_context(&fake_project(), &["android", "build-app"], unix_env(false, false));
    let run = run_build(
        context,
        |invoker| invoker.with_version_output("command not found"),
        |s| s,
    )
    .await;

    assert_pipeline_failed_at(&run, "clean-build-artifacts");
    assert!(matches!(
        run.result,
        Err(StepError::Version(VersionError::Unrecognized(_)))
    ));
    assert!(run.journal.runs_of("webpack").is_empty());
}
