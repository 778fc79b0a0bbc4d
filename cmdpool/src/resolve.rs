use crate::errors::LaunchError;
use std::{
    env,
    path::{Path, PathBuf},
};

/// Resolve `program` the way a shell would before exec.
///
/// Names with a path separator are used as given, bare names are searched
/// for in `$PATH` in order.
pub fn resolve(program: &str) -> Result<PathBuf, LaunchError> {
    let not_found = || LaunchError::NotFound {
        program: program.to_string(),
    };
    if program.is_empty() {
        return Err(not_found());
    }
    let path = Path::new(program);
    if path.components().count() > 1 {
        return if is_executable(path) {
            Ok(path.to_path_buf())
        } else {
            Err(not_found())
        };
    }
    let path_var = env::var_os("PATH").ok_or_else(not_found)?;
    env::split_paths(&path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
        .ok_or_else(not_found)
}

fn is_executable(path: &Path) -> bool {
    let metadata = match path.metadata() {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => return false,
    };
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        let _ = metadata;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_bare_name_in_path() {
        let path = resolve("sh").expect("sh on PATH");
        assert!(path.is_absolute());
        assert!(path.ends_with("sh"));
    }

    #[test]
    fn accepts_explicit_path() {
        let sh = resolve("sh").expect("sh on PATH");
        let again = resolve(sh.to_str().expect("utf-8 path")).expect("explicit path");
        assert_eq!(sh, again);
    }

    #[test]
    fn rejects_missing_and_empty() {
        assert!(matches!(
            resolve("definitely_not_a_command_xyz"),
            Err(LaunchError::NotFound { .. })
        ));
        assert!(matches!(resolve(""), Err(LaunchError::NotFound { .. })));
        assert!(resolve("/nonexistent/bin/tool").is_err());
    }

    #[test]
    fn relative_path_is_not_searched_in_path() {
        // sh is on PATH, but neither name points at it from the crate dir
        assert!(resolve("sh").is_ok());
        assert!(matches!(resolve("./sh"), Err(LaunchError::NotFound { .. })));
        assert!(matches!(resolve("bin/sh"), Err(LaunchError::NotFound { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn rejects_non_executable_file() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let path = file.path().to_str().expect("utf-8 path");
        assert!(resolve(path).is_err());
    }
}
