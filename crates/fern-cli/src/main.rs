//! fern CLI - Create, build, and run Fern C++ projects

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fern_core::build::signal;
use fern_core::tui::{CreateArgs, RunArgs};
use fern_core::{GlobalConfig, ProductConfig};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Fern product configuration
#[derive(Clone)]
pub struct FernConfig;

impl ProductConfig for FernConfig {
    fn name(&self) -> &'static str {
        "fern"
    }

    fn display_name(&self) -> &'static str {
        "Fern"
    }

    fn version(&self) -> &'static str {
        CLI_VERSION
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/fernkit/fern"
    }

    fn next_steps(&self, dir: &Path) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_ref() != Some(&dir.to_path_buf()) {
            steps.push(format!("cd {}", dir.display()));
        }

        steps.push(format!("{} run                  # Run your project", self.name()));
        steps.push(format!("Read the docs at {}", self.docs_url()));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "fern")]
#[command(about = "CLI for creating and running Fern C++ projects")]
#[command(version)]
pub struct Args {
    /// Show debug logs and the full compiler command
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build and run the current project, or a single source file
    #[command(visible_alias = "fire")]
    Run(CliRunArgs),
    /// Create a new Fern project
    #[command(visible_alias = "sprout")]
    Create(CliCreateArgs),
}

#[derive(Parser, Debug)]
pub struct CliRunArgs {
    /// Source file to run (.cpp, .cxx, .cc); runs the current project when omitted
    pub path: Option<PathBuf>,

    /// Keep the temporary executable built from a single file
    #[arg(long)]
    pub keep: bool,

    /// Kill the compiler if it runs longer than this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Project name (letters, numbers, underscores, hyphens)
    pub name: String,

    /// Directory to create the project in
    #[arg(short, long)]
    pub directory: Option<PathBuf>,
}

impl CliRunArgs {
    fn into_run_args(self, verbose: bool) -> RunArgs {
        RunArgs {
            path: self.path,
            keep: self.keep,
            timeout: self.timeout.map(Duration::from_secs),
            verbose,
        }
    }
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            name: args.name,
            directory: args.directory,
        }
    }
}

/// Initialise the global tracing subscriber on stderr
fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        fern_core::tui::restore_cursor();
        default_panic(info);
    }));

    let args = Args::parse();
    init_tracing(args.verbose);

    // Ctrl+C stops the CLI itself, or is left to a running child
    signal::install_handler(fern_core::tui::restore_cursor)
        .context("Failed to install Ctrl+C handler")?;

    let product = FernConfig;

    let result = match args.command {
        Command::Run(run_args) => {
            let config = GlobalConfig::load()?;
            if let Some(source) = config.source() {
                tracing::debug!(config = %source.display(), "using global config");
            }
            fern_core::tui::run_program(&product, &config, run_args.into_run_args(args.verbose))
                .await
        }
        Command::Create(create_args) => fern_core::tui::create(&product, create_args.into()).await,
    };

    // Ensure cursor is visible on normal exit
    fern_core::tui::restore_cursor();

    if let Err(e) = result {
        std::process::exit(e.exit_code());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_without_path_is_project_mode() {
        let args = Args::try_parse_from(["fern", "run"]).unwrap();
        match args.command {
            Command::Run(run) => {
                assert!(run.path.is_none());
                assert!(!run.keep);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_aliases() {
        let args = Args::try_parse_from(["fern", "fire", "demo.cpp", "--keep"]).unwrap();
        match args.command {
            Command::Run(run) => {
                assert_eq!(run.path, Some(PathBuf::from("demo.cpp")));
                assert!(run.keep);
            }
            _ => panic!("expected run"),
        }

        let args = Args::try_parse_from(["fern", "sprout", "my_app"]).unwrap();
        assert!(matches!(args.command, Command::Create(ref c) if c.name == "my_app"));
    }

    #[test]
    fn test_create_requires_name() {
        assert!(Args::try_parse_from(["fern", "create"]).is_err());
        assert!(Args::try_parse_from(["fern", "create", "a", "b"]).is_err());
    }

    #[test]
    fn test_timeout_and_verbose() {
        let args = Args::try_parse_from(["fern", "run", "--timeout", "30", "-v"]).unwrap();
        assert!(args.verbose);
        match args.command {
            Command::Run(run) => {
                let run = run.into_run_args(args.verbose);
                assert_eq!(run.timeout, Some(Duration::from_secs(30)));
                assert!(run.verbose);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_next_steps_include_cd() {
        let steps = FernConfig.next_steps(Path::new("/definitely/elsewhere/app"));
        assert_eq!(steps[0], "cd /definitely/elsewhere/app");
        assert!(steps[1].starts_with("fern run"));
    }
}
