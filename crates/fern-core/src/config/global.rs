//! Global toolchain configuration loaded from `~/.fern/config.yaml`

use super::ConfigProvider;
use crate::error::{FernError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable pointing at an alternative global config file
pub const CONFIG_PATH_ENV: &str = "FERN_CONFIG";

/// Environment variable overriding the compiler binary
pub const COMPILER_ENV: &str = "FERN_CXX";

const DEFAULT_COMPILER: &str = "g++";
const DEFAULT_FLAGS: &[&str] = &["-std=c++17", "-O2"];
const DEFAULT_INCLUDE_PATHS: &[&str] = &["/usr/local/include"];
const DEFAULT_LIBRARY_PATHS: &[&str] = &["/usr/local/lib"];
const DEFAULT_LIBRARIES: &[&str] = &["fern", "X11", "Xext"];

/// Header whose presence marks the framework as installed
const FERN_HEADER: &str = "fern/fern.hpp";

/// On-disk shape of the global config file
///
/// Every field is optional; a present field replaces the built-in default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfigFile {
    /// Force the installed state instead of probing the filesystem
    #[serde(default)]
    pub installed: Option<bool>,

    #[serde(default)]
    pub compiler: Option<String>,

    #[serde(default)]
    pub flags: Option<Vec<String>>,

    #[serde(default)]
    pub include_paths: Option<Vec<PathBuf>>,

    #[serde(default)]
    pub library_paths: Option<Vec<PathBuf>>,

    #[serde(default)]
    pub libraries: Option<Vec<String>>,
}

/// Process-wide toolchain configuration
///
/// Built once in `main` and passed by reference; values never change afterwards.
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    installed: bool,
    compiler: String,
    flags: Vec<String>,
    include_paths: Vec<PathBuf>,
    library_paths: Vec<PathBuf>,
    libraries: Vec<String>,
    source: Option<PathBuf>,
}

impl GlobalConfig {
    /// Load from `$FERN_CONFIG` or `$HOME/.fern/config.yaml`, falling back to defaults
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(default_config_path);
        let compiler_override = std::env::var(COMPILER_ENV).ok().filter(|c| !c.is_empty());

        match path {
            Some(path) if path.is_file() => Self::from_file(&path, compiler_override),
            _ => {
                debug!("no global config file, using defaults");
                Ok(Self::from_parts(GlobalConfigFile::default(), compiler_override, None))
            }
        }
    }

    /// Load a specific config file
    pub fn from_file(path: &Path, compiler_override: Option<String>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: GlobalConfigFile = if content.trim().is_empty() {
            GlobalConfigFile::default()
        } else {
            serde_yaml::from_str(&content).map_err(|e| {
                FernError::Config(format!("Failed to parse {}: {}", path.display(), e))
            })?
        };
        debug!(path = %path.display(), "loaded global config");
        Ok(Self::from_parts(file, compiler_override, Some(path.to_path_buf())))
    }

    /// Merge a parsed file over the defaults
    pub fn from_parts(
        file: GlobalConfigFile,
        compiler_override: Option<String>,
        source: Option<PathBuf>,
    ) -> Self {
        let compiler = compiler_override
            .or(file.compiler)
            .unwrap_or_else(|| DEFAULT_COMPILER.to_string());
        let flags = file
            .flags
            .unwrap_or_else(|| DEFAULT_FLAGS.iter().map(|s| s.to_string()).collect());
        let include_paths = file
            .include_paths
            .unwrap_or_else(|| DEFAULT_INCLUDE_PATHS.iter().map(PathBuf::from).collect());
        let library_paths = file
            .library_paths
            .unwrap_or_else(|| DEFAULT_LIBRARY_PATHS.iter().map(PathBuf::from).collect());
        let libraries = file
            .libraries
            .unwrap_or_else(|| DEFAULT_LIBRARIES.iter().map(|s| s.to_string()).collect());

        let installed = file
            .installed
            .unwrap_or_else(|| detect_installed(&include_paths, &library_paths));

        Self {
            installed,
            compiler,
            flags,
            include_paths,
            library_paths,
            libraries,
            source,
        }
    }

    /// Config file the values came from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl ConfigProvider for GlobalConfig {
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

fn default_config_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".fern").join("config.yaml"))
}

/// The library counts as installed when its header and a `libfern.*` are both present
fn detect_installed(include_paths: &[PathBuf], library_paths: &[PathBuf]) -> bool {
    let has_header = include_paths.iter().any(|p| p.join(FERN_HEADER).is_file());
    let has_library = library_paths.iter().any(|dir| {
        std::fs::read_dir(dir)
            .map(|entries| {
                entries.filter_map(|e| e.ok()).any(|e| {
                    e.file_name()
                        .to_str()
                        .is_some_and(|name| name.starts_with("libfern."))
                })
            })
            .unwrap_or(false)
    });
    debug!(has_header, has_library, "probed fern installation");
    has_header && has_library
}
