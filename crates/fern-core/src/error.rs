//! Error kinds reported by the build and scaffold workflows

use std::io;
use std::path::PathBuf;

/// Errors that can occur while creating or running Fern projects
///
/// Every variant is a reportable condition, not a crash. The binary maps each
/// one to a distinct process exit code via [`FernError::exit_code`].
#[derive(Debug, thiserror::Error)]
pub enum FernError {
    #[error("Not in a Fern project directory (no fern.yaml found above {})", .start.display())]
    NotAProject { start: PathBuf },

    #[error("No entry source found at {}", .path.display())]
    MissingEntrySource { path: PathBuf },

    #[error("File not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Unsupported file type: {extension}")]
    UnsupportedFileType { extension: String },

    #[error("Fern C++ library is not installed globally")]
    ToolchainNotInstalled,

    #[error("Compilation failed")]
    CompileFailure { diagnostics: String },

    #[error("Compilation timed out after {secs} seconds")]
    CompileTimeout { secs: u64 },

    #[error("Failed to launch {program}: {source}")]
    LaunchFailure {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Program exited with code {code}")]
    RuntimeNonZeroExit { code: i32 },

    #[error("Stopped by user")]
    Interrupted,

    #[error("Invalid project name: {name}")]
    InvalidName { name: String },

    #[error("Directory '{}' already exists", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Failed to write {}: {source}", .path.display())]
    PartialScaffoldWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl FernError {
    /// Process exit code for this error kind
    pub fn exit_code(&self) -> i32 {
        match self {
            FernError::NotAProject { .. } => 2,
            FernError::MissingEntrySource { .. } => 3,
            FernError::SourceNotFound { .. } | FernError::UnsupportedFileType { .. } => 4,
            FernError::ToolchainNotInstalled => 5,
            FernError::CompileFailure { .. } | FernError::CompileTimeout { .. } => 6,
            FernError::LaunchFailure { .. } => 7,
            FernError::RuntimeNonZeroExit { .. } => 8,
            FernError::InvalidName { .. } => 9,
            FernError::AlreadyExists { .. } => 10,
            FernError::PartialScaffoldWrite { .. } => 11,
            FernError::Interrupted => 130,
            FernError::Config(_) | FernError::Io(_) => 1,
        }
    }

    /// Follow-up hint shown below the error message, if any
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            FernError::NotAProject { .. } => {
                Some("Run 'fern create <project_name>' to create a new project")
            }
            FernError::MissingEntrySource { .. } => Some("Create lib/main.cpp with your Fern code"),
            FernError::UnsupportedFileType { .. } => Some("Supported types: .cpp, .cxx, .cc"),
            FernError::ToolchainNotInstalled => {
                Some("Run './install.sh' from the Fern source directory to install")
            }
            FernError::InvalidName { .. } => Some(
                "Project name should only contain letters, numbers, underscores, and hyphens",
            ),
            _ => None,
        }
    }
}

/// Result type alias for fern operations
pub type Result<T> = std::result::Result<T, FernError>;
