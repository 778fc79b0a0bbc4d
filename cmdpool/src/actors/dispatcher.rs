mod actor;
mod messages;

use crate::cancel::CancelSignal;
use crate::errors::{self, DispatchError};
use crate::job::JobDescriptor;
use actor::Dispatcher;
use messages::DispatcherMessage;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

/// The consuming end of the job stream, shared by every worker.
///
/// This struct is an actor handle. Jobs stay with the dispatcher actor until a
/// worker asks for one, so a job is never queued ahead of a ready worker.
#[derive(Clone)]
pub struct JobStream {
    sender: mpsc::Sender<DispatcherMessage>,
}

impl JobStream {
    /// Block until the dispatcher hands this caller its next job.
    /// `None` once the stream is closed.
    pub async fn next_job(&self) -> Option<JobDescriptor> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(DispatcherMessage::NextJob { response: tx })
            .await
            .ok()?;
        rx.await.ok()
    }
}

/// Resolves to the dispatcher's final status.
pub struct DispatchStatus {
    task: JoinHandle<errors::Result<()>>,
}

impl DispatchStatus {
    pub async fn wait(self) -> errors::Result<()> {
        self.task.await.map_err(DispatchError::from)?
    }
}

/// Start feeding `jobs`, in order, to whoever pulls from the returned stream.
pub fn dispatch(jobs: Vec<JobDescriptor>, cancel: CancelSignal) -> (JobStream, DispatchStatus) {
    let (sender, inbox) = mpsc::channel(1);
    let task = Dispatcher::spawn(inbox, jobs, cancel);
    (JobStream { sender }, DispatchStatus { task })
}
