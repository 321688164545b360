//! Build-and-run workflow
//!
//! A `fern run` invocation resolves a [`BuildPlan`] (project mode or single-file
//! mode), compiles it, runs the result, and removes temporary output. Each step is
//! a separate function so front-ends can report progress between them.

use crate::build::{
    build_invocation, run_executable, BuildExecutor, BuildResult, CommandInvocation,
    CompileTarget, ExecutionResult,
};
use crate::config::BuildConfiguration;
use crate::error::{FernError, Result};
use crate::project::{find_project_root, ProjectRoot};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Source suffixes accepted in single-file mode
pub const SUPPORTED_EXTENSIONS: &[&str] = &["cpp", "cxx", "cc"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildMode {
    /// Compile `lib/main.cpp` of a detected project into `build/main`
    Project(ProjectRoot),
    /// Compile one source file into `<stem>_temp` next to it
    SingleFile,
}

/// Everything needed to compile and run one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPlan {
    pub mode: BuildMode,
    pub target: CompileTarget,
}

impl BuildPlan {
    pub fn executable(&self) -> &Path {
        &self.target.output
    }

    /// Single-file output is removed after the run unless kept
    pub fn has_temporary_output(&self) -> bool {
        matches!(self.mode, BuildMode::SingleFile)
    }

    pub fn project_root(&self) -> Option<&ProjectRoot> {
        match &self.mode {
            BuildMode::Project(root) => Some(root),
            BuildMode::SingleFile => None,
        }
    }
}

/// Resolve project mode from `start_dir`
pub fn plan_project(start_dir: &Path) -> Result<BuildPlan> {
    let root = find_project_root(start_dir).ok_or_else(|| FernError::NotAProject {
        start: start_dir.to_path_buf(),
    })?;

    let structure = root.structure();
    let entry = structure.entry_source();
    if !entry.is_file() {
        return Err(FernError::MissingEntrySource { path: entry });
    }

    Ok(BuildPlan {
        target: CompileTarget::new(entry, structure.output_executable()),
        mode: BuildMode::Project(root),
    })
}

/// Resolve single-file mode for `source`
pub fn plan_single_file(source: &Path) -> Result<BuildPlan> {
    if !source.exists() {
        return Err(FernError::SourceNotFound {
            path: source.to_path_buf(),
        });
    }

    let extension = source
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    if !SUPPORTED_EXTENSIONS.contains(&extension) {
        return Err(FernError::UnsupportedFileType {
            extension: if extension.is_empty() {
                "(none)".to_string()
            } else {
                format!(".{}", extension)
            },
        });
    }

    Ok(BuildPlan {
        mode: BuildMode::SingleFile,
        target: CompileTarget::single_file(source),
    })
}

/// Assemble the compiler command and make sure the output directory exists
///
/// Refuses with [`FernError::ToolchainNotInstalled`] before touching the
/// filesystem when the library is not installed.
pub fn prepare_invocation(
    plan: &BuildPlan,
    config: &BuildConfiguration,
) -> Result<CommandInvocation> {
    let invocation = build_invocation(config, &plan.target)?;

    if let BuildMode::Project(root) = &plan.mode {
        let build_dir = root.structure().build;
        std::fs::create_dir_all(&build_dir)?;
        debug!(build_dir = %build_dir.display(), "ensured build directory");
    }

    Ok(invocation)
}

/// Run the compiler; a non-zero exit becomes [`FernError::CompileFailure`]
///
/// On success the returned result may still carry warnings.
pub async fn compile(
    invocation: &CommandInvocation,
    executor: &BuildExecutor,
) -> Result<BuildResult> {
    let result = executor.execute(invocation).await?;
    if !result.success {
        return Err(FernError::CompileFailure {
            diagnostics: result.diagnostic_text,
        });
    }
    Ok(result)
}

/// Run the produced executable in the foreground
pub async fn run(plan: &BuildPlan) -> ExecutionResult {
    run_executable(plan.executable()).await
}

/// Remove temporary single-file output
///
/// Returns the removed path, or `None` when nothing was removed.
pub fn cleanup(plan: &BuildPlan, keep: bool) -> Result<Option<PathBuf>> {
    if keep || !plan.has_temporary_output() {
        return Ok(None);
    }

    let output = plan.executable();
    match std::fs::remove_file(output) {
        Ok(()) => {
            debug!(path = %output.display(), "removed temporary executable");
            Ok(Some(output.to_path_buf()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => {
            warn!(path = %output.display(), error = %e, "failed to remove temporary executable");
            Err(e.into())
        }
    }
}
