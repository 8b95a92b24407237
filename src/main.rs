mod cli;

use clap::Parser;
use pyboot::output::{ConsoleReporter, Reporter};
use pyboot::runner::SystemRunner;
use pyboot::workspace::DiskWorkspace;
use pyboot::{Error as BootError, LaunchPlan, Pipeline, PipelineReport};

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    init_tracing();

    let out = ConsoleReporter::new(!cli.yes);

    match run(&cli, &out).await {
        Ok(report) => {
            // The service's own exit code is propagated verbatim; the
            // orchestrator never reinterprets a foreign process's status.
            std::process::exit(report.exit.code.unwrap_or(0));
        }
        Err(e) => {
            out.blank();
            if let Some(boot_err) = e.downcast_ref::<BootError>() {
                out.fatal(&format!("Error: {}", boot_err));
                if let Some(suggestion) = boot_err.suggestion() {
                    eprintln!();
                    eprintln!("Hint: {}", suggestion);
                }
            } else {
                out.fatal(&format!("Error: {:#}", e));
            }
            // Keep the diagnostics visible if the console window closes with us.
            out.acknowledge();
            std::process::exit(1);
        }
    }
}

async fn run(cli: &cli::Cli, out: &ConsoleReporter) -> anyhow::Result<PipelineReport> {
    let work_dir = match &cli.workdir {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };

    let mut plan = LaunchPlan::new(work_dir);
    if let Some(port) = cli.port {
        plan.port = port;
    }
    plan.skip_install = cli.skip_install;

    let report = Pipeline::new(&SystemRunner, &DiskWorkspace, out)
        .run(&plan)
        .await?;
    Ok(report)
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
