//! Project root detection

use super::{ENTRY_SOURCE, HIDDEN_CONFIG_DIR, MARKER_FILE};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A directory containing the project marker file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    path: PathBuf,
}

impl ProjectRoot {
    /// Absolute path of the project root
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the marker file
    pub fn marker(&self) -> PathBuf {
        self.path.join(MARKER_FILE)
    }

    pub fn structure(&self) -> ProjectStructure {
        project_structure(&self.path)
    }
}

/// Canonical subdirectories of a project
///
/// Derived purely from the root path; nothing here is guaranteed to exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStructure {
    pub root: PathBuf,
    pub lib: PathBuf,
    pub build: PathBuf,
    pub web: PathBuf,
    pub linux: PathBuf,
    pub assets: PathBuf,
    pub examples: PathBuf,
    pub hidden_config: PathBuf,
}

impl ProjectStructure {
    /// Entry source compiled in project mode
    pub fn entry_source(&self) -> PathBuf {
        self.lib.join(ENTRY_SOURCE)
    }

    /// Executable produced in project mode
    pub fn output_executable(&self) -> PathBuf {
        self.build.join("main")
    }

    /// Name to path mapping, in a fixed order
    pub fn entries(&self) -> Vec<(&'static str, &Path)> {
        vec![
            ("lib", self.lib.as_path()),
            ("build", self.build.as_path()),
            ("web", self.web.as_path()),
            ("linux", self.linux.as_path()),
            ("assets", self.assets.as_path()),
            ("examples", self.examples.as_path()),
            ("hidden_config", self.hidden_config.as_path()),
        ]
    }
}

/// Derive the fixed subdirectory set under `root`
pub fn project_structure(root: &Path) -> ProjectStructure {
    ProjectStructure {
        root: root.to_path_buf(),
        lib: root.join("lib"),
        build: root.join("build"),
        web: root.join("web"),
        linux: root.join("linux"),
        assets: root.join("assets"),
        examples: root.join("examples"),
        hidden_config: root.join(HIDDEN_CONFIG_DIR),
    }
}

/// Walk from `start_dir` up to the filesystem root looking for the marker file
///
/// `start_dir` itself is checked first. Directories that cannot be probed count as
/// no match. Returns `None` when no ancestor holds the marker.
pub fn find_project_root(start_dir: &Path) -> Option<ProjectRoot> {
    let start = if start_dir.is_absolute() {
        start_dir.to_path_buf()
    } else {
        std::env::current_dir().ok()?.join(start_dir)
    };

    for dir in start.ancestors() {
        trace!(dir = %dir.display(), "checking for project marker");
        if has_marker(dir) {
            debug!(root = %dir.display(), "found project root");
            return Some(ProjectRoot {
                path: dir.to_path_buf(),
            });
        }
    }

    debug!(start = %start.display(), "no project root found");
    None
}

fn has_marker(dir: &Path) -> bool {
    // Permission errors surface as Err and are treated as absent
    std::fs::metadata(dir.join(MARKER_FILE))
        .map(|m| m.is_file())
        .unwrap_or(false)
}
