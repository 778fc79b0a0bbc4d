use crate::actors::{aggregator, dispatcher::dispatch, worker};
use crate::cancel::CancelSignal;
use crate::config::PoolConfig;
use crate::errors;
use crate::events::{Outcome, WorkerExit};
use crate::handoff;
use crate::job::JobDescriptor;
use crate::types::RunId;
use tracing::{debug, error, info_span, warn, Instrument};
use uuid::Uuid;

/// Run `jobs` on a pool of `config.workers` workers, passing every outcome to
/// `consumer` as it arrives.
///
/// Outcomes arrive in process completion order. Jobs that fail to launch
/// produce no outcome. The returned error is informational: it only says the
/// dispatcher stopped before handing out every job.
pub async fn run_pipeline<F>(
    jobs: Vec<JobDescriptor>,
    config: &PoolConfig,
    consumer: F,
) -> errors::Result<()>
where
    F: FnMut(Outcome),
{
    run_pipeline_with_cancel(jobs, config, CancelSignal::new(), consumer).await
}

/// Like [`run_pipeline`], with a caller-held cancellation signal.
///
/// Closing `cancel` stops dispatch and outcome delivery; processes that are
/// already running are waited on, not killed. The signal is closed once the
/// run returns.
pub async fn run_pipeline_with_cancel<F>(
    jobs: Vec<JobDescriptor>,
    config: &PoolConfig,
    cancel: CancelSignal,
    mut consumer: F,
) -> errors::Result<()>
where
    F: FnMut(Outcome),
{
    let run_id: RunId = Uuid::new_v4();
    let span = info_span!("run", %run_id, workers = config.workers, jobs = jobs.len());
    async move {
        let _release = cancel.close_on_drop();

        let (job_stream, dispatch_status) = dispatch(jobs, cancel.clone());
        let (outcome_tx, mut outcome_rx) = handoff::channel();
        let workers = worker::spawn_pool(
            config.workers,
            config.stdio,
            &cancel,
            &job_stream,
            &outcome_tx,
        );
        // only the workers may keep the job stream alive
        drop(job_stream);
        let exits = aggregator::spawn(workers, outcome_tx);

        let mut delivered = 0usize;
        while let Some(outcome) = outcome_rx.recv().await {
            delivered += 1;
            consumer(outcome);
        }

        let exits = match exits.await {
            Ok(exits) => exits,
            Err(err) => {
                error!(error = %err, "aggregator task failed");
                Vec::new()
            }
        };
        let launch_failures = exits
            .iter()
            .filter(|exit| **exit == WorkerExit::LaunchFailed)
            .count();
        debug!(delivered, launch_failures, "outcome stream closed");

        let status = dispatch_status.wait().await;
        if let Err(err) = &status {
            warn!(error = %err, "dispatch stopped early");
        }
        status
    }
    .instrument(span)
    .await
}
