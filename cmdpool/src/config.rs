use std::process::Stdio;

pub const DEFAULT_WORKERS: usize = 5;

/// What a launched child does with stdin/stdout/stderr.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StdioPolicy {
    /// share the runner's own streams
    #[default]
    Inherit,
    /// discard all child I/O
    Null,
}

impl StdioPolicy {
    pub(crate) fn stdio(self) -> Stdio {
        match self {
            StdioPolicy::Inherit => Stdio::inherit(),
            StdioPolicy::Null => Stdio::null(),
        }
    }
}

/// Immutable settings for one pipeline run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Upper bound on concurrently running child processes.
    pub workers: usize,
    pub stdio: StdioPolicy,
}

impl PoolConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_stdio(mut self, stdio: StdioPolicy) -> Self {
        self.stdio = stdio;
        self
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            stdio: StdioPolicy::default(),
        }
    }
}
