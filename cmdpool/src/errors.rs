use crate::types::{Pid, Program};
use std::{io, path::PathBuf, result};
use thiserror::Error;
use tokio::task::JoinError;

/// Reported by the dispatcher once it stops handing out jobs early.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("dispatch canceled")]
    Canceled,
    #[error("no workers left to accept {remaining} remaining job(s)")]
    WorkersExhausted { remaining: usize },
    #[error("dispatcher task aborted: {0}")]
    Aborted(#[from] JoinError),
}

/// Anything that keeps a worker from getting a job's process to completion.
/// Every variant is terminal for the worker that hit it.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("{program:?}: executable file not found in $PATH")]
    NotFound { program: Program },
    #[error("{}: failed to start: {source}", path.display())]
    Spawn { path: PathBuf, source: io::Error },
    #[error("{}: started without a pid", path.display())]
    MissingPid { path: PathBuf },
    #[error("pid {pid}: failed to wait on child: {source}")]
    Wait { pid: Pid, source: io::Error },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{}: invalid job list: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub type Result<T> = result::Result<T, DispatchError>;
