//! Toolchain configuration
//!
//! This module provides:
//! - The [`ConfigProvider`] trait consumed by the build workflow
//! - [`BuildConfiguration`], an immutable per-build snapshot of a provider
//! - [`GlobalConfig`], the provider backed by the global config file

pub mod global;

use std::path::PathBuf;

pub use global::{GlobalConfig, GlobalConfigFile};

/// Source of installed-state and build parameters for the native toolchain
///
/// Implementations must return stable values for the lifetime of the process.
/// All sequences are returned in the order they must appear on the command line.
pub trait ConfigProvider {
    /// Whether the Fern C++ library is installed where the paths point
    fn is_installed(&self) -> bool;

    /// Compiler binary name or path (e.g., "g++")
    fn compiler(&self) -> &str;

    /// Flags passed before include paths
    fn flags(&self) -> &[String];

    /// Header search paths, each emitted as `-I <path>`
    fn include_paths(&self) -> &[PathBuf];

    /// Library search paths, each emitted as `-L <path>`
    fn library_paths(&self) -> &[PathBuf];

    /// Libraries to link, each emitted as `-l <name>`, in link order
    fn libraries(&self) -> &[String];
}

/// Snapshot of a [`ConfigProvider`] taken once at the start of a build
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfiguration {
    pub installed: bool,
    pub compiler: String,
    pub flags: Vec<String>,
    pub include_paths: Vec<PathBuf>,
    pub library_paths: Vec<PathBuf>,
    pub libraries: Vec<String>,
}

impl BuildConfiguration {
    /// Copy every value out of a provider
    pub fn from_provider(provider: &dyn ConfigProvider) -> Self {
        Self {
            installed: provider.is_installed(),
            compiler: provider.compiler().to_string(),
            flags: provider.flags().to_vec(),
            include_paths: provider.include_paths().to_vec(),
            library_paths: provider.library_paths().to_vec(),
            libraries: provider.libraries().to_vec(),
        }
    }
}

impl ConfigProvider for BuildConfiguration {
    fn is_installed(&self) -> bool {
        self.installed
    }

    fn compiler(&self) -> &str {
        &self.compiler
    }

    fn flags(&self) -> &[String] {
        &self.flags
    }

    fn include_paths(&self) -> &[PathBuf] {
        &self.include_paths
    }

    fn library_paths(&self) -> &[PathBuf] {
        &self.library_paths
    }

    fn libraries(&self) -> &[String] {
        &self.libraries
    }
}
