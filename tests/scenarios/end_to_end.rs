//! Test: End to end - the commands a build issues, in order

use crate::helpers::*;
use ns_bundle::core::ExecutionStatus;
use ns_bundle::ExecutionEvent;

#[tokio::test]
async fn test_android_build_sequence() {
    let context = build_context(&fake_project(), &["android", "build-app"], unix_env(false, false));
    let run = run_default(context).await;

    assert_pipeline_completed(&run);
    assert_eq!(run.pipeline.name, "build android");
    assert_eq!(
        run.journal.entries(),
        vec![
            "tns prepare android --bundle --disable-npm-install",
            "tns clean-app android",
            "snapshot:clean",
            "tns --version",
            "webpack --config=webpack.config.js --progress --env.android",
            "tns build android --bundle --disable-npm-install",
        ]
    );
}

#[tokio::test]
async fn test_ios_start_sequence() {
    let context = build_context(&fake_project(), &["ios", "start-app"], unix_env(false, false));
    let run = run_default(context).await;

    assert_pipeline_completed(&run);
    assert_eq!(
        run.journal.entries(),
        vec![
            "tns prepare ios --bundle --disable-npm-install",
            "tns clean-app ios",
            "snapshot:clean",
            "webpack --config=webpack.config.js --progress --env.ios",
            "tns start ios --bundle --disable-npm-install",
        ]
    );
}

#[tokio::test]
async fn test_prepare_only_ends_with_bundle() {
    let context = build_context(&fake_project(), &["android"], unix_env(false, false));
    let run = run_default(context).await;

    assert_pipeline_completed(&run);
    assert_eq!(run.pipeline.name, "prepare android");
    assert_eq!(
        run.journal.entries().last().map(String::as_str),
        Some("webpack --config=webpack.config.js --progress --env.android")
    );
}

#[tokio::test]
async fn test_nobundle_skips_bundling_steps() {
    let context = build_context(
        &fake_project(),
        &["ios", "nobundle", "build-app", "env.aot"],
        unix_env(true, false),
    );
    let run = run_default(context).await;

    assert_pipeline_completed(&run);
    assert_eq!(
        run.journal.entries(),
        vec![
            "tns prepare ios --bundle --disable-npm-install",
            "tns build ios --bundle --disable-npm-install",
        ]
    );
    assert_eq!(run.pipeline.step_names(), vec!["prepare", "run(build, ios)"]);
}

#[tokio::test]
async fn test_recorded_tokens_flow_through() {
    let context = context_from_tokens(
        &fake_project(),
        &["run", "ns-bundle", "--android", "--build-app", "--release", "--env.aot"],
        unix_env(false, false),
    );
    let run = run_default(context).await;

    assert_pipeline_completed(&run);
    assert_eq!(
        run.journal.runs_of("tns"),
        vec![
            "tns prepare android --bundle --disable-npm-install --release",
            "tns clean-app android",
            "tns --version",
            "tns build android --bundle --disable-npm-install --release",
        ]
    );
    assert_eq!(
        run.journal.runs_of("webpack"),
        vec!["webpack --config=webpack.config.js --progress --env.android --env.aot"]
    );
}

#[tokio::test]
async fn test_commands_run_in_project_dir() {
    let project = fake_project();
    let context = build_context(&project, &["android", "build-app"], unix_env(false, false));
    let run = run_default(context).await;

    let commands = run.invoker.commands();
    assert!(!commands.is_empty());
    for command in commands {
        assert_eq!(command.current_dir.as_deref(), Some(project.as_path()));
    }
}

#[tokio::test]
async fn test_events_follow_steps() {
    let context = build_context(&fake_project(), &["ios", "nobundle", "build-app"], unix_env(false, false));
    let run = run_default(context).await;

    assert_eq!(run.events.len(), 6);
    assert!(matches!(
        &run.events[0],
        ExecutionEvent::PipelineStarted { total_steps: 2, pipeline_name, .. } if pipeline_name == "build ios"
    ));
    assert!(matches!(&run.events[1], ExecutionEvent::StepStarted { index: 0, step } if step == "prepare"));
    assert!(matches!(&run.events[2], ExecutionEvent::StepCompleted { index: 0, .. }));
    assert!(matches!(&run.events[3], ExecutionEvent::StepStarted { index: 1, step } if step == "run(build, ios)"));
    assert!(matches!(&run.events[4], ExecutionEvent::StepCompleted { index: 1, .. }));
    assert!(matches!(
        run.events[5],
        ExecutionEvent::PipelineCompleted { status: ExecutionStatus::Completed, .. }
    ));
    assert_eq!(run.pipeline.state.completed_steps, 2);
}
