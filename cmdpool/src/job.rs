use crate::errors::LoadError;
use crate::types::{Args, Program};
use serde::Deserialize;
use std::{fs, path::Path};

/// One external process to launch.
///
/// `profile` and `log` are opaque labels: the pipeline only attaches them to
/// its log spans and never interprets them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct JobDescriptor {
    #[serde(default)]
    pub profile: String,
    #[serde(rename = "cmd")]
    pub executable: Program,
    #[serde(rename = "args", default)]
    pub arguments: Args,
    #[serde(rename = "log", default)]
    pub log_target: String,
}

impl JobDescriptor {
    pub fn new(executable: impl Into<Program>, arguments: Args) -> Self {
        Self {
            executable: executable.into(),
            arguments,
            ..Self::default()
        }
    }
}

/// Parse a JSON array of job objects.
pub fn parse_jobs(raw: &str) -> serde_json::Result<Vec<JobDescriptor>> {
    serde_json::from_str(raw)
}

/// Read and parse a job file.
pub fn load_jobs(path: impl AsRef<Path>) -> Result<Vec<JobDescriptor>, LoadError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_jobs(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
