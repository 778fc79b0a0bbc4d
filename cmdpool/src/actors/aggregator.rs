use crate::events::{Outcome, WorkerExit};
use crate::handoff;
use futures::future::join_all;
use tokio::task::JoinHandle;
use tracing::{debug, error, Instrument};

/// Close the outcome stream once every worker has exited.
///
/// `sink` is the aggregator's own sender; the stream stays open until it and
/// every worker's clone are dropped. Resolves to each worker's exit reason,
/// leaving out workers that panicked.
pub fn spawn(
    workers: Vec<JoinHandle<WorkerExit>>,
    sink: handoff::Sender<Outcome>,
) -> JoinHandle<Vec<WorkerExit>> {
    tokio::spawn(
        async move {
            let exits: Vec<WorkerExit> = join_all(workers)
                .await
                .into_iter()
                .enumerate()
                .filter_map(|(id, joined)| match joined {
                    Ok(exit) => {
                        debug!(worker = id, ?exit, "worker exited");
                        Some(exit)
                    }
                    Err(err) => {
                        error!(worker = id, error = %err, "worker task failed");
                        None
                    }
                })
                .collect();
            drop(sink);
            exits
        }
        .in_current_span(),
    )
}
