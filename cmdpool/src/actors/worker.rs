mod launch;

use super::dispatcher::JobStream;
use crate::cancel::CancelSignal;
use crate::config::StdioPolicy;
use crate::events::{Outcome, WorkerExit};
use crate::handoff;
use crate::types::WorkerId;
use tokio::{select, task::JoinHandle};
use tracing::{error, info_span, Instrument};

/// Spawn `count` workers sharing one job stream and one outcome sink.
pub fn spawn_pool(
    count: usize,
    stdio: StdioPolicy,
    cancel: &CancelSignal,
    jobs: &JobStream,
    outcomes: &handoff::Sender<Outcome>,
) -> Vec<JoinHandle<WorkerExit>> {
    (0..count)
        .map(|id| {
            let worker = run_worker(id, stdio, cancel.clone(), jobs.clone(), outcomes.clone());
            tokio::spawn(worker.instrument(info_span!("worker", id)))
        })
        .collect()
}

/// Pull jobs one at a time until the stream closes, running each to completion.
///
/// Any failure to get a job's process running ends this worker; the job is
/// dropped without an outcome and the remaining jobs go to the other workers.
pub async fn run_worker(
    id: WorkerId,
    stdio: StdioPolicy,
    cancel: CancelSignal,
    jobs: JobStream,
    outcomes: handoff::Sender<Outcome>,
) -> WorkerExit {
    while let Some(job) = jobs.next_job().await {
        let span = info_span!("job", worker = id, profile = %job.profile, log = %job.log_target);
        let outcome = match launch::run_to_completion(&job, stdio)
            .instrument(span.clone())
            .await
        {
            Ok(outcome) => outcome,
            Err(err) => {
                span.in_scope(|| {
                    error!(command = %job.executable, args = ?job.arguments, error = %err, "launch failed")
                });
                return WorkerExit::LaunchFailed;
            }
        };
        select! {
            biased;
            _ = cancel.closed() => return WorkerExit::Canceled,
            delivered = outcomes.send(outcome) => {
                if delivered.is_err() {
                    return WorkerExit::SinkClosed;
                }
            }
        }
    }
    WorkerExit::Drained
}
