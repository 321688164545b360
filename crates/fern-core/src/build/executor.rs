//! Compiler process execution

use super::invocation::CommandInvocation;
use super::signal::{self, ChildGuard};
use crate::error::{FernError, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Outcome of one compiler run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    pub success: bool,
    /// Compiler stderr, verbatim. Holds warnings when the build succeeded.
    pub diagnostic_text: String,
}

/// Runs the native toolchain and classifies its exit
#[derive(Debug, Clone, Default)]
pub struct BuildExecutor {
    timeout: Option<Duration>,
}

impl BuildExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kill the compiler if it runs longer than `limit`
    pub fn with_timeout(mut self, limit: Option<Duration>) -> Self {
        self.timeout = limit;
        self
    }

    /// Spawn the compiler, wait for it, and capture its stderr
    ///
    /// A non-zero exit is a normal `Ok` result with `success == false`. Only a
    /// failure to start the process, a timeout, or a user interrupt is an `Err`.
    pub async fn execute(&self, invocation: &CommandInvocation) -> Result<BuildResult> {
        debug!(command = %invocation, "invoking compiler");

        let guard = ChildGuard::new();
        let child = TokioCommand::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| FernError::LaunchFailure {
                program: invocation.program.clone(),
                source,
            })?;

        guard.track(child.id());

        let output = match self.timeout {
            Some(limit) => match timeout(limit, child.wait_with_output()).await {
                Ok(output) => output?,
                Err(_) => {
                    warn!(secs = limit.as_secs(), "compiler timed out, killed");
                    return Err(FernError::CompileTimeout {
                        secs: limit.as_secs(),
                    });
                }
            },
            None => child.wait_with_output().await?,
        };

        if signal::was_interrupted() || signal::killed_by_interrupt(&output.status) {
            return Err(FernError::Interrupted);
        }

        let diagnostic_text = String::from_utf8_lossy(&output.stderr).into_owned();
        debug!(status = %output.status, "compiler finished");

        Ok(BuildResult {
            success: output.status.success(),
            diagnostic_text,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::test_support::process_lock;
    use std::ffi::OsString;

    /// `sh -c <body> sh <args...>` standing in for a compiler
    fn shell(body: &str, args: &[&str]) -> CommandInvocation {
        let mut argv: Vec<OsString> = vec!["-c".into(), body.into(), "sh".into()];
        argv.extend(args.iter().map(OsString::from));
        CommandInvocation {
            program: "sh".to_string(),
            args: argv,
        }
    }

    #[tokio::test]
    async fn test_success() {
        let _lock = process_lock();
        let result = BuildExecutor::new()
            .execute(&shell("exit 0", &["main.cpp"]))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.diagnostic_text, "");
    }

    #[tokio::test]
    async fn test_non_zero_exit_captures_stderr_verbatim() {
        let _lock = process_lock();
        let result = BuildExecutor::new()
            .execute(&shell("printf 'error: X' >&2; exit 2", &[]))
            .await
            .unwrap();
        assert_eq!(
            result,
            BuildResult {
                success: false,
                diagnostic_text: "error: X".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_success_keeps_warnings() {
        let _lock = process_lock();
        let result = BuildExecutor::new()
            .execute(&shell("echo 'warning: unused' >&2", &[]))
            .await
            .unwrap();
        assert!(result.success);
        assert_eq!(result.diagnostic_text, "warning: unused\n");
    }

    #[tokio::test]
    async fn test_arguments_are_passed_in_order() {
        let _lock = process_lock();
        let tmp = tempfile::tempdir().unwrap();
        let log = tmp.path().join("args.txt");
        let body = format!("printf '%s\\n' \"$@\" > '{}'", log.display());

        BuildExecutor::new()
            .execute(&shell(&body, &["-std=c++17", "-I", "/inc", "a.cpp", "-o", "a"]))
            .await
            .unwrap();

        let recorded = std::fs::read_to_string(&log).unwrap();
        assert_eq!(recorded, "-std=c++17\n-I\n/inc\na.cpp\n-o\na\n");
    }

    #[tokio::test]
    async fn test_missing_compiler_is_launch_failure() {
        let _lock = process_lock();
        let invocation = CommandInvocation {
            program: "/nonexistent/fern-test-compiler".to_string(),
            args: vec![],
        };
        let err = BuildExecutor::new().execute(&invocation).await.unwrap_err();
        assert!(matches!(err, FernError::LaunchFailure { .. }));
    }

    #[tokio::test]
    async fn test_timeout_kills_compiler() {
        let _lock = process_lock();
        let err = BuildExecutor::new()
            .with_timeout(Some(Duration::from_millis(100)))
            .execute(&shell("exec sleep 5", &[]))
            .await
            .unwrap_err();
        assert!(matches!(err, FernError::CompileTimeout { .. }));
    }
}
