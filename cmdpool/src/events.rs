use crate::types::{Pid, Program};
use std::{fmt, path::PathBuf};

/// The result of running one job's process to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub command: Program,
    pub resolved_path: PathBuf,
    /// true iff the process exited with status code 0
    pub succeeded: bool,
    pub pid: Pid,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) pid={} success={}",
            self.command,
            self.resolved_path.display(),
            self.pid,
            self.succeeded
        )
    }
}

/// Why a worker stopped pulling jobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerExit {
    /// the job stream closed
    Drained,
    /// the cancellation signal closed before an outcome could be delivered
    Canceled,
    /// a job could not be resolved, started or waited on
    LaunchFailed,
    /// nobody is reading outcomes anymore
    SinkClosed,
}
