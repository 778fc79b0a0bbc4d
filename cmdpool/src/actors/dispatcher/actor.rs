use super::messages::DispatcherMessage;
use crate::cancel::CancelSignal;
use crate::errors::{self, DispatchError};
use crate::job::JobDescriptor;
use std::collections::VecDeque;
use tokio::{select, sync::mpsc, task::JoinHandle};
use tracing::{debug, Instrument};

pub struct Dispatcher {
    inbox: mpsc::Receiver<DispatcherMessage>,
    jobs: VecDeque<JobDescriptor>,
    cancel: CancelSignal,
    dispatched: usize,
}

impl Dispatcher {
    pub fn spawn(
        inbox: mpsc::Receiver<DispatcherMessage>,
        jobs: Vec<JobDescriptor>,
        cancel: CancelSignal,
    ) -> JoinHandle<errors::Result<()>> {
        let actor = Self {
            inbox,
            jobs: jobs.into(),
            cancel,
            dispatched: 0,
        };
        tokio::spawn(async move { actor.run().await }.in_current_span())
    }

    // returning drops the inbox, which closes the stream for waiting workers
    async fn run(mut self) -> errors::Result<()> {
        while let Some(job) = self.jobs.pop_front() {
            self.hand_off(job).await?;
        }
        debug!(dispatched = self.dispatched, "all jobs dispatched");
        Ok(())
    }

    /// Wait for an idle worker and give it `job`.
    async fn hand_off(&mut self, mut job: JobDescriptor) -> errors::Result<()> {
        loop {
            let msg = select! {
                biased;
                _ = self.cancel.closed() => return Err(self.canceled()),
                msg = self.inbox.recv() => msg,
            };
            match msg {
                Some(DispatcherMessage::NextJob { response }) => {
                    if self.cancel.is_closed() {
                        return Err(self.canceled());
                    }
                    match response.send(job) {
                        Ok(()) => {
                            self.dispatched += 1;
                            return Ok(());
                        }
                        // the requesting worker went away, offer the job to the next one
                        Err(returned) => job = returned,
                    }
                }
                None => {
                    return Err(DispatchError::WorkersExhausted {
                        remaining: self.jobs.len() + 1,
                    })
                }
            }
        }
    }

    fn canceled(&self) -> DispatchError {
        debug!(
            dispatched = self.dispatched,
            remaining = self.jobs.len() + 1,
            "dispatch canceled"
        );
        DispatchError::Canceled
    }
}
