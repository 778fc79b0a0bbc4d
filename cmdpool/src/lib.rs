mod actors;
pub mod cancel;
pub mod config;
pub mod errors;
mod events;
pub mod handoff;
pub mod job;
mod pipeline;
pub mod resolve;
pub mod types;

pub use actors::dispatcher::{dispatch, DispatchStatus, JobStream};
pub use actors::worker::run_worker;
pub use cancel::CancelSignal;
pub use config::{PoolConfig, StdioPolicy};
pub use errors::{DispatchError, LaunchError, LoadError};
pub use events::{Outcome, WorkerExit};
pub use job::{load_jobs, parse_jobs, JobDescriptor};
pub use pipeline::{run_pipeline, run_pipeline_with_cancel};
