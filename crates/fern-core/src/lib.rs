//! Fern Core - Shared library for the `fern` developer CLI
//!
//! This library provides the core functionality for creating Fern C++ projects and
//! for compiling and running them with the globally installed Fern library.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Project detection, compiler invocation assembly,
//!   child process execution, scaffolding
//! - **Layer 2: Workflow Orchestration** - [`workflow`] steps for `fern run`,
//!   [`ConfigProvider`] and [`ProductConfig`] traits for substitutable configuration
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based reporting (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based command front-end
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use fern_core::{workflow, BuildConfiguration, BuildExecutor, GlobalConfig};
//!
//! let config = GlobalConfig::load()?;
//! let snapshot = BuildConfiguration::from_provider(&config);
//! let plan = workflow::plan_project(&std::env::current_dir()?)?;
//! let invocation = workflow::prepare_invocation(&plan, &snapshot)?;
//! workflow::compile(&invocation, &BuildExecutor::new()).await?;
//! let outcome = workflow::run(&plan).await;
//! ```

pub mod build;
pub mod config;
pub mod error;
pub mod product;
pub mod project;
pub mod scaffold;
pub mod workflow;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use build::{BuildExecutor, BuildResult, CommandInvocation, CompileTarget, ExecutionResult};
pub use config::{BuildConfiguration, ConfigProvider, GlobalConfig};
pub use error::{FernError, Result};
pub use product::ProductConfig;
pub use project::{find_project_root, ProjectManifest, ProjectRoot};
pub use scaffold::{create_project, ScaffoldReport};

/// Serializes tests that spawn processes or write executables
#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::{Mutex, MutexGuard};

    static PROCESS_LOCK: Mutex<()> = Mutex::new(());

    pub fn process_lock() -> MutexGuard<'static, ()> {
        PROCESS_LOCK.lock().unwrap_or_else(|e| e.into_inner())
    }
}
