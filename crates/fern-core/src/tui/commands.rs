//! Charm-style command front-end using cliclack

use crate::build::{BuildExecutor, ExecutionResult};
use crate::config::{BuildConfiguration, ConfigProvider};
use crate::error::{FernError, Result};
use crate::product::ProductConfig;
use crate::project::{ProjectManifest, ProjectRoot};
use crate::scaffold::{self, ScaffoldReport};
use crate::workflow::{self, BuildPlan};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// CLI arguments for the run command
#[derive(Debug, Clone, Default)]
pub struct RunArgs {
    /// Single source file; project mode when absent
    pub path: Option<PathBuf>,

    /// Keep the temporary single-file executable after running
    pub keep: bool,

    /// Kill the compiler after this long
    pub timeout: Option<Duration>,

    /// Show the full compiler command
    pub verbose: bool,
}

/// CLI arguments for the create command
#[derive(Debug, Clone)]
pub struct CreateArgs {
    /// Project name, also the directory name
    pub name: String,

    /// Parent directory for the new project (defaults to the current directory)
    pub directory: Option<PathBuf>,
}

/// Build and run a project or single file
pub async fn run_program<C: ProductConfig>(
    product: &C,
    provider: &dyn ConfigProvider,
    args: RunArgs,
) -> Result<()> {
    let title = match &args.path {
        Some(path) => format!("Running {}", path.display()),
        None => format!("Running {} project", product.display_name()),
    };
    cliclack::intro(title)?;

    let plan = match build(product, provider, &args).await {
        Ok(plan) => plan,
        Err(e) => return Err(fail(e)),
    };

    cliclack::outro(format!("Running {}", plan.executable().display()))?;

    let outcome = workflow::run(&plan).await;

    match workflow::cleanup(&plan, args.keep) {
        Ok(Some(removed)) => debug!(path = %removed.display(), "cleaned up temporary files"),
        Ok(None) => {}
        Err(e) => eprintln!(
            "{} could not remove {}: {}",
            "Warning:".yellow(),
            plan.executable().display(),
            e
        ),
    }

    report_outcome(&outcome);
    outcome.into_result(plan.executable())
}

/// Resolve, compile, and report everything up to the run step
async fn build<C: ProductConfig>(
    product: &C,
    provider: &dyn ConfigProvider,
    args: &RunArgs,
) -> Result<BuildPlan> {
    let plan = match &args.path {
        Some(path) => workflow::plan_single_file(path)?,
        None => {
            let cwd = std::env::current_dir()?;
            let plan = workflow::plan_project(&cwd)?;
            if let Some(root) = plan.project_root() {
                describe_project(product, root)?;
            }
            plan
        }
    };

    let config = BuildConfiguration::from_provider(provider);
    let invocation = workflow::prepare_invocation(&plan, &config)?;
    if args.verbose {
        cliclack::log::remark(invocation.to_string())?;
    }

    let executor = BuildExecutor::new().with_timeout(args.timeout);
    let spinner = cliclack::spinner();
    spinner.start("Compiling...");

    match workflow::compile(&invocation, &executor).await {
        Ok(result) => {
            spinner.stop("Build successful!");
            let warnings = result.diagnostic_text.trim_end();
            if !warnings.is_empty() {
                cliclack::log::warning("Compiler reported warnings:")?;
                eprintln!("{}", warnings);
            }
            Ok(plan)
        }
        Err(e) => {
            spinner.error("Build failed");
            Err(e)
        }
    }
}

fn describe_project<C: ProductConfig>(product: &C, root: &ProjectRoot) -> Result<()> {
    cliclack::log::info(format!(
        "Found {} project at: {}",
        product.display_name(),
        root.path().display()
    ))?;

    match ProjectManifest::load(root.path()) {
        Ok(manifest) => {
            let version = manifest.version.as_deref().unwrap_or("unversioned");
            cliclack::log::info(format!("Project: {} ({})", manifest.name, version))?;
            if let Some(warning) = manifest.check_compatibility(product.version()) {
                cliclack::log::warning(format!("Version warning: {}", warning))?;
            }
        }
        Err(e) => {
            warn!(error = %e, "could not read project manifest");
            cliclack::log::warning(format!("Could not read fern.yaml: {}", e))?;
        }
    }

    Ok(())
}

fn report_outcome(outcome: &ExecutionResult) {
    println!();
    match outcome {
        ExecutionResult::CompletedNormally => {
            println!("{}", "Program finished".green());
        }
        ExecutionResult::FailedWithNonZeroExit(code) => {
            eprintln!("{} program exited with code {}", "Runtime error:".red().bold(), code);
        }
        ExecutionResult::TerminatedByUser => {
            println!("{}", "Stopped by user".yellow());
        }
        ExecutionResult::ExecutableMissing => {
            eprintln!("{} executable not found", "Error:".red().bold());
        }
        ExecutionResult::LaunchError(message) => {
            eprintln!("{} could not start program: {}", "Error:".red().bold(), message);
        }
    }
}

/// Create a new project
pub async fn create<C: ProductConfig>(product: &C, args: CreateArgs) -> Result<()> {
    cliclack::intro(format!(
        "Creating {} project: {}",
        product.display_name(),
        args.name
    ))?;

    let parent = match &args.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let spinner = cliclack::spinner();
    spinner.start("Creating project...");

    let report = match scaffold::create_project(&parent, &args.name).await {
        Ok(report) => {
            spinner.stop(format!(
                "Project '{}' created in {}",
                args.name,
                report.root.display()
            ));
            report
        }
        Err(e) => {
            spinner.error("Failed to create project");
            return Err(fail(e));
        }
    };

    cliclack::log::info(describe_tree(&report))?;
    print_next_steps(product, &report.root)?;

    Ok(())
}

/// Tree listing of the written files
fn describe_tree(report: &ScaffoldReport) -> String {
    let mut lines = vec!["Created project files:".to_string()];
    for (i, file) in report.files.iter().enumerate() {
        let branch = if i + 1 == report.files.len() {
            "└──"
        } else {
            "├──"
        };
        lines.push(format!("  {} {}", branch, file.display()));
    }
    lines.join("\n")
}

fn print_next_steps<C: ProductConfig>(product: &C, project_dir: &Path) -> Result<()> {
    let steps = product.next_steps(project_dir);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}

/// Report an error inside the open cliclack frame and close it
fn fail(err: FernError) -> FernError {
    let _ = cliclack::log::error(err.to_string());

    if let FernError::CompileFailure { diagnostics } = &err {
        eprintln!("{}", diagnostics.trim_end());
    }
    if let Some(hint) = err.hint() {
        let _ = cliclack::log::info(hint);
    }

    let closing = match err {
        FernError::Interrupted => "Stopped by user",
        _ => "Aborted",
    };
    let _ = cliclack::outro_cancel(closing);

    err
}
