use anyhow::{Context, Result};
use ns_bundle::cli::args::{pipeline_tokens, NPM_ARGV_VAR};
use ns_bundle::cli::output::{format_execution_event, format_plan, style, CROSS, INFO};
use ns_bundle::cli::Cli;
use ns_bundle::core::{config::ToolConfig, flags::classify_all};
use ns_bundle::{
    compose, compose_pipeline, BuildContext, BuildEnvironment, BuildOptions, ExecutionEngine,
    ProjectSnapshotArtifacts, StepError, StepLibrary, SystemInvoker,
};
use std::sync::Arc;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() {
    let cli = Cli::from_args();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli).await {
        eprintln!("{} {}", CROSS, style(format!("{:#}", e)).red());
        std::process::exit(exit_code(&e));
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout belongs to the child processes
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")
}

async fn run(cli: Cli) -> Result<()> {
    let recorded = std::env::var(NPM_ARGV_VAR).ok();
    let tokens = pipeline_tokens(&cli.flags, recorded.as_deref())?;
    debug!("Pipeline tokens: {:?}", tokens);

    let options = BuildOptions::resolve(&classify_all(&tokens))?;

    let project_dir = match cli.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };
    let tools = ToolConfig::load(&project_dir, cli.config.as_deref())
        .context("Failed to load tool config")?;

    let context = BuildContext::new(project_dir, options, BuildEnvironment::capture(), tools);
    debug!("Build context: {:?}", context);

    let library = Arc::new(StepLibrary::new(
        Arc::new(context),
        Arc::new(SystemInvoker::new()),
        Arc::new(ProjectSnapshotArtifacts::new()),
    ));

    if cli.dry_run {
        let plan: Vec<(String, String)> = compose(library.context())
            .iter()
            .map(|kind| (kind.to_string(), library.describe(kind)))
            .collect();
        println!("{} Steps that would run:", INFO);
        print!("{}", format_plan(&plan));
        return Ok(());
    }

    let mut pipeline = compose_pipeline(library);
    let mut engine = ExecutionEngine::new();
    // stdout belongs to the child processes
    engine.add_event_handler(|event| eprintln!("{}", format_execution_event(&event)));

    engine.execute(&mut pipeline).await?;
    Ok(())
}

/// The failing child's exit code when there is one, 1 otherwise
fn exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<StepError>()
        .map(StepError::exit_code)
        .unwrap_or(1)
}
