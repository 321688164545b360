//! Project discovery and the `fern.yaml` manifest
//!
//! This module provides:
//! - Upward search for the project marker file
//! - Canonical project subdirectory layout
//! - Best-effort parsing of the project manifest

pub mod detector;
pub mod manifest;

pub use detector::{find_project_root, project_structure, ProjectRoot, ProjectStructure};
pub use manifest::ProjectManifest;

/// Marker file identifying a project root
pub const MARKER_FILE: &str = "fern.yaml";

/// Entry source file, relative to the project's `lib` directory
pub const ENTRY_SOURCE: &str = "main.cpp";

/// Hidden per-project configuration directory
pub const HIDDEN_CONFIG_DIR: &str = ".fern";
