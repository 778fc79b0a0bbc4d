use crate::job::JobDescriptor;
use tokio::sync::oneshot;

#[derive(Debug)]
pub enum DispatcherMessage {
    /// A worker is idle and ready to take exactly one job.
    NextJob {
        response: oneshot::Sender<JobDescriptor>,
    },
}
