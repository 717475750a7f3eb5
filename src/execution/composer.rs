//! Pipeline composer - decides which steps run and in what order
//!
//! The order is fixed: prepare, then the bundling steps (cleaning before the
//! bundle), then snapshot installation, then the requested CLI command.
//! Conditions are evaluated once here; execution never branches.

use crate::{
    core::{BuildContext, Pipeline, StepKind},
    execution::steps::{BuildStep, StepLibrary},
};
use std::sync::Arc;

/// Ordered step kinds for a build context
pub fn compose(context: &BuildContext) -> Vec<StepKind> {
    let options = &context.options;
    let mut steps = vec![StepKind::Prepare];

    if options.bundle {
        steps.push(StepKind::CleanApp);
        steps.push(StepKind::CleanSnapshotArtifacts);
        steps.push(StepKind::CleanBuildArtifacts);
        steps.push(StepKind::Bundle);
    }

    if context.should_snapshot() {
        steps.push(StepKind::InstallSnapshotArtifacts);
    }

    // the build/start command runs after everything else
    if let Some(command) = &options.command {
        steps.push(StepKind::RunCommand {
            command: command.clone(),
            platform: options.platform,
        });
    }

    steps
}

/// Bind the composed steps to a library, ready for the engine
pub fn compose_pipeline(library: Arc<StepLibrary>) -> Pipeline {
    let context = library.context();
    let name = match &context.options.command {
        Some(command) => format!("{} {}", command, context.platform()),
        None => format!("prepare {}", context.platform()),
    };

    compose(context)
        .into_iter()
        .fold(Pipeline::new(name), |pipeline, kind| {
            pipeline.with_step(BuildStep::new(kind, library.clone()))
        })
}
