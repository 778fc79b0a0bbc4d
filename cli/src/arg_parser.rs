use clap::{ErrorKind, Parser};
use cmdpool::{config::DEFAULT_WORKERS, PoolConfig, StdioPolicy};
use std::path::PathBuf;

/// Exit status when no job file was given.
pub const MISSING_EXEC_STATUS: i32 = 5;

/// Run the commands of a JSON job file on a fixed pool of workers
#[derive(Debug, Parser)]
#[clap(version)]
pub struct ArgParser {
    /// cmd JSON file: [{"profile", "cmd", "args", "log"}, ...]
    #[clap(long = "exec", env = "CMDPOOL_EXEC", parse(from_os_str))]
    pub exec: PathBuf,

    /// max parallel execution routines
    #[clap(long, env = "CMDPOOL_ROUTINES", default_value_t = DEFAULT_WORKERS)]
    pub routines: usize,

    /// discard the output of launched commands
    #[clap(short, long)]
    pub quiet: bool,
}

impl ArgParser {
    /// Parse the process arguments, exiting with `MISSING_EXEC_STATUS` when
    /// the job file is missing and with clap's own status otherwise.
    pub fn parse_or_exit() -> Self {
        Self::try_parse().unwrap_or_else(|err| {
            if is_missing_exec(&err) {
                let _ = err.print();
                std::process::exit(MISSING_EXEC_STATUS);
            }
            err.exit()
        })
    }

    pub fn pool_config(&self) -> PoolConfig {
        let stdio = if self.quiet {
            StdioPolicy::Null
        } else {
            StdioPolicy::Inherit
        };
        PoolConfig::default()
            .with_workers(self.routines)
            .with_stdio(stdio)
    }
}

fn is_missing_exec(err: &clap::Error) -> bool {
    err.kind() == ErrorKind::MissingRequiredArgument
}
