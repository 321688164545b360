//! Running the produced executable in the foreground

use super::signal::{self, ChildGuard};
use crate::error::FernError;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command as TokioCommand;
use tracing::debug;

/// How a run of the produced binary ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    CompletedNormally,
    FailedWithNonZeroExit(i32),
    TerminatedByUser,
    ExecutableMissing,
    LaunchError(String),
}

impl ExecutionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::CompletedNormally)
    }

    /// Map to the error reported by the command layer
    pub fn into_result(self, executable: &Path) -> crate::error::Result<()> {
        match self {
            ExecutionResult::CompletedNormally => Ok(()),
            ExecutionResult::FailedWithNonZeroExit(code) => {
                Err(FernError::RuntimeNonZeroExit { code })
            }
            ExecutionResult::TerminatedByUser => Err(FernError::Interrupted),
            ExecutionResult::ExecutableMissing => Err(FernError::LaunchFailure {
                program: executable.display().to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "executable not found"),
            }),
            ExecutionResult::LaunchError(message) => Err(FernError::LaunchFailure {
                program: executable.display().to_string(),
                source: io::Error::other(message),
            }),
        }
    }
}

/// Run `executable` with the terminal's stdin/stdout/stderr
///
/// Checks existence first and never spawns a missing path. Blocks until the
/// program exits; no timeout is applied.
pub async fn run_executable(executable: &Path) -> ExecutionResult {
    if !executable.exists() {
        return ExecutionResult::ExecutableMissing;
    }

    debug!(executable = %executable.display(), "launching program");

    let guard = ChildGuard::new();
    let mut child = match TokioCommand::new(program_path(executable))
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => return ExecutionResult::LaunchError(e.to_string()),
    };

    guard.track(child.id());
    let status = child.wait().await;
    let interrupted = signal::was_interrupted();
    drop(guard);

    match status {
        Ok(status) => classify_exit(&status, interrupted),
        Err(e) => ExecutionResult::LaunchError(e.to_string()),
    }
}

/// Bare file names would be looked up on `PATH`; anchor them to the current directory
fn program_path(executable: &Path) -> PathBuf {
    match executable.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => executable.to_path_buf(),
        _ if executable.is_absolute() => executable.to_path_buf(),
        _ => Path::new(".").join(executable),
    }
}

/// Classify a finished child
///
/// A user interrupt takes precedence over whatever exit status the child chose.
pub fn classify_exit(status: &ExitStatus, interrupted: bool) -> ExecutionResult {
    if interrupted || signal::killed_by_interrupt(status) {
        return ExecutionResult::TerminatedByUser;
    }
    if status.success() {
        return ExecutionResult::CompletedNormally;
    }
    match status.code() {
        Some(code) => ExecutionResult::FailedWithNonZeroExit(code),
        None => ExecutionResult::FailedWithNonZeroExit(128 + terminating_signal(status)),
    }
}

#[cfg(unix)]
fn terminating_signal(status: &ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().unwrap_or(0)
}

#[cfg(not(unix))]
fn terminating_signal(_status: &ExitStatus) -> i32 {
    0
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::test_support::process_lock;
    use std::os::unix::fs::PermissionsExt;
    use std::os::unix::process::ExitStatusExt;

    fn script(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("program");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn test_missing_executable_is_not_spawned() {
        let tmp = tempfile::tempdir().unwrap();
        let result = run_executable(&tmp.path().join("build").join("main")).await;
        assert_eq!(result, ExecutionResult::ExecutableMissing);
    }

    #[tokio::test]
    async fn test_completed_normally() {
        let _lock = process_lock();
        let tmp = tempfile::tempdir().unwrap();
        let program = script(tmp.path(), "exit 0");
        assert_eq!(
            run_executable(&program).await,
            ExecutionResult::CompletedNormally
        );
    }

    #[tokio::test]
    async fn test_non_zero_exit() {
        let _lock = process_lock();
        let tmp = tempfile::tempdir().unwrap();
        let program = script(tmp.path(), "exit 3");
        assert_eq!(
            run_executable(&program).await,
            ExecutionResult::FailedWithNonZeroExit(3)
        );
    }

    #[tokio::test]
    async fn test_interrupt_is_terminated_by_user() {
        let _lock = process_lock();
        let tmp = tempfile::tempdir().unwrap();
        let program = script(tmp.path(), "kill -INT $$\nsleep 1");
        assert_eq!(
            run_executable(&program).await,
            ExecutionResult::TerminatedByUser
        );
    }

    #[tokio::test]
    async fn test_non_executable_is_launch_error() {
        let _lock = process_lock();
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("main");
        std::fs::write(&path, "not a program").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        assert!(matches!(
            run_executable(&path).await,
            ExecutionResult::LaunchError(_)
        ));
    }

    #[test]
    fn test_classify_exit() {
        // Raw wait statuses: exit code in the high byte, signal in the low bits
        assert_eq!(
            classify_exit(&ExitStatus::from_raw(0), false),
            ExecutionResult::CompletedNormally
        );
        assert_eq!(
            classify_exit(&ExitStatus::from_raw(2 << 8), false),
            ExecutionResult::FailedWithNonZeroExit(2)
        );
        assert_eq!(
            classify_exit(&ExitStatus::from_raw(2), false),
            ExecutionResult::TerminatedByUser
        );
        assert_eq!(
            classify_exit(&ExitStatus::from_raw(9), false),
            ExecutionResult::FailedWithNonZeroExit(137)
        );
        assert_eq!(
            classify_exit(&ExitStatus::from_raw(1 << 8), true),
            ExecutionResult::TerminatedByUser
        );
    }

    #[test]
    fn test_bare_names_are_anchored_to_cwd() {
        assert_eq!(program_path(Path::new("hello_temp")), PathBuf::from("./hello_temp"));
        assert_eq!(
            program_path(Path::new("demos/hello_temp")),
            PathBuf::from("demos/hello_temp")
        );
        assert_eq!(program_path(Path::new("/tmp/main")), PathBuf::from("/tmp/main"));
    }

    #[test]
    fn test_into_result_maps_errors() {
        let exe = Path::new("build/main");
        assert!(ExecutionResult::CompletedNormally.into_result(exe).is_ok());
        assert!(matches!(
            ExecutionResult::FailedWithNonZeroExit(4).into_result(exe),
            Err(FernError::RuntimeNonZeroExit { code: 4 })
        ));
        assert!(matches!(
            ExecutionResult::TerminatedByUser.into_result(exe),
            Err(FernError::Interrupted)
        ));
        assert!(matches!(
            ExecutionResult::ExecutableMissing.into_result(exe),
            Err(FernError::LaunchFailure { .. })
        ));
    }
}
