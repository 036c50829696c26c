use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use kuberes::{
    cli::{Args, Command, ResourceArgs},
    config::Config,
    export,
    k8s::{
        client::{build_client, current_context},
        collect,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "kres", &mut std::io::stdout());
        return Ok(());
    }
    if args.mangen {
        clap_mangen::Man::new(Args::command()).render(&mut std::io::stdout())?;
        return Ok(());
    }

    init_logging(args.log_filter());

    let Some(Command::Resource(resource)) = &args.command else {
        Args::command().print_help()?;
        return Ok(());
    };
    let config = Config::load(args.config.as_deref())?;
    report(&args, resource, &config).await
}

/// Logs go to stderr so report output piped from stdout stays clean.
fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn report(args: &Args, resource: &ResourceArgs, config: &Config) -> Result<()> {
    let kubeconfig = args.kubeconfig_path(config);
    info!(context = %current_context(kubeconfig), "connecting to cluster");
    let client = build_client(kubeconfig).await?;

    let items = collect::run(&client, resource.namespaces(config))
        .await
        .context("Failed to collect workload controllers")?;

    let outputs = resource.outputs(config);
    if outputs.is_empty() {
        info!("no --json, --csv or --excel given, nothing exported");
        return Ok(());
    }
    export::write_all(&items, &outputs).context("Failed to export report")
}
