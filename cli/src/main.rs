mod arg_parser;

use arg_parser::ArgParser;
use cmdpool::{load_jobs, run_pipeline_with_cancel, CancelSignal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ArgParser::parse_or_exit();
    let jobs = load_jobs(&args.exec)?;
    info!(jobs = jobs.len(), routines = args.routines, "loaded job list");

    let cancel = CancelSignal::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupted, no further jobs will be started");
            on_interrupt.close();
        }
    });

    // a dispatch error is already logged by the pipeline and never fails the run
    let _ = run_pipeline_with_cancel(jobs, &args.pool_config(), cancel, |outcome| {
        info!(%outcome, "result")
    })
    .await;

    Ok(())
}
