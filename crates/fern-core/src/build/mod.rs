//! Compiling and running Fern programs
//!
//! This module provides:
//! - Compiler invocation assembly from a [`BuildConfiguration`](crate::config::BuildConfiguration)
//! - Compiler execution with stderr capture
//! - Foreground execution of the produced binary
//! - User interrupt tracking shared by both child processes

pub mod executor;
pub mod invocation;
pub mod runner;
pub mod signal;

pub use executor::{BuildExecutor, BuildResult};
pub use invocation::{build_invocation, CommandInvocation, CompileTarget};
pub use runner::{classify_exit, run_executable, ExecutionResult};
