use crate::config::StdioPolicy;
use crate::errors::LaunchError;
use crate::events::Outcome;
use crate::job::JobDescriptor;
use crate::resolve::resolve;
use tokio::process;
use tracing::info;

/// Resolve, start and wait on one job's process.
pub async fn run_to_completion(
    job: &JobDescriptor,
    stdio: StdioPolicy,
) -> Result<Outcome, LaunchError> {
    let path = resolve(&job.executable)?;

    let mut command = process::Command::new(&path);
    #[cfg(unix)]
    command.arg0(&job.executable);
    let mut child = command
        .args(&job.arguments)
        .stdin(stdio.stdio())
        .stdout(stdio.stdio())
        .stderr(stdio.stdio())
        .spawn()
        .map_err(|source| LaunchError::Spawn {
            path: path.clone(),
            source,
        })?;
    let pid = child
        .id()
        .ok_or_else(|| LaunchError::MissingPid { path: path.clone() })?;
    info!(pid, command = %job.executable, args = ?job.arguments, "start");

    // the child runs to completion even if the run is canceled meanwhile
    let status = child
        .wait()
        .await
        .map_err(|source| LaunchError::Wait { pid, source })?;
    info!(pid, command = %job.executable, args = ?job.arguments, code = ?status.code(), "end");

    Ok(Outcome {
        command: job.executable.clone(),
        resolved_path: path,
        succeeded: status.success(),
        pid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn exit_status_decides_success() {
        let ok = run_to_completion(&JobDescriptor::new("true", vec![]), StdioPolicy::Null)
            .await
            .expect("true runs");
        assert!(ok.succeeded);
        assert!(ok.pid > 0);
        assert!(ok.resolved_path.is_absolute());

        let failed = run_to_completion(
            &JobDescriptor::new("sh", vec!["-c".into(), "exit 3".into()]),
            StdioPolicy::Null,
        )
        .await
        .expect("sh runs");
        assert!(!failed.succeeded);
        assert_eq!(failed.command, "sh");
    }

    #[tokio::test]
    async fn unresolvable_program_is_an_error() {
        let err = run_to_completion(
            &JobDescriptor::new("definitely_not_a_command_xyz", vec![]),
            StdioPolicy::Null,
        )
        .await
        .expect_err("nothing to run");
        assert!(matches!(err, LaunchError::NotFound { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn executable_that_cannot_start_is_a_spawn_error() {
        use std::io::Write;
        use std::os::unix::fs::PermissionsExt;

        // an executable file whose contents exec rejects
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"\x7fELF but not really\n")
            .expect("write bogus executable");
        let path = file.into_temp_path();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod 755");
        let program = path.to_str().expect("utf-8 path").to_string();

        let err = run_to_completion(&JobDescriptor::new(program, vec![]), StdioPolicy::Null)
            .await
            .expect_err("not a runnable program");
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }
}
