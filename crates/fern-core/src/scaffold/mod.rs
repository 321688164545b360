//! New project scaffolding
//!
//! Creates the fixed directory layout and writes the starter templates. Writes are
//! not transactional: a failure after the root directory exists is reported as
//! [`FernError::PartialScaffoldWrite`] and whatever was created stays on disk.

pub mod templates;

use crate::error::{FernError, Result};
use crate::project::HIDDEN_CONFIG_DIR;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub use templates::{render, ProjectTemplate, PROJECT_TEMPLATES};

/// Directories created under a new project root, in creation order
pub const PROJECT_DIRECTORIES: &[&str] = &[
    "lib",
    "web",
    "linux",
    "assets",
    "examples",
    HIDDEN_CONFIG_DIR,
];

/// What a successful scaffold produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    /// Created directories, relative to `root`
    pub directories: Vec<PathBuf>,
    /// Written files, relative to `root`
    pub files: Vec<PathBuf>,
}

/// Project names may only contain ASCII letters, digits, `_` and `-`
pub fn is_valid_project_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Create `<parent_dir>/<name>` with the standard layout and starter files
///
/// Validation happens before any filesystem mutation.
pub async fn create_project(parent_dir: &Path, name: &str) -> Result<ScaffoldReport> {
    if !is_valid_project_name(name) {
        return Err(FernError::InvalidName {
            name: name.to_string(),
        });
    }

    let root = parent_dir.join(name);
    if fs::symlink_metadata(&root).await.is_ok() {
        return Err(FernError::AlreadyExists { path: root });
    }

    fs::create_dir(&root).await.map_err(|e| match e.kind() {
        io::ErrorKind::AlreadyExists => FernError::AlreadyExists { path: root.clone() },
        _ => FernError::Io(e),
    })?;
    debug!(root = %root.display(), "created project root");

    let mut directories = Vec::with_capacity(PROJECT_DIRECTORIES.len());
    for dir in PROJECT_DIRECTORIES {
        let path = root.join(dir);
        fs::create_dir_all(&path)
            .await
            .map_err(|source| FernError::PartialScaffoldWrite {
                path: path.clone(),
                source,
            })?;
        directories.push(PathBuf::from(dir));
    }

    let files = write_templates(&root, name, PROJECT_TEMPLATES).await?;

    Ok(ScaffoldReport {
        root,
        directories,
        files,
    })
}

/// Render and write each template under `root`, stopping at the first failure
///
/// Files written before the failure stay on disk.
pub(crate) async fn write_templates(
    root: &Path,
    name: &str,
    templates: &[ProjectTemplate],
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::with_capacity(templates.len());
    for template in templates {
        let path = root.join(template.path);
        fs::write(&path, template.render(name))
            .await
            .map_err(|source| FernError::PartialScaffoldWrite {
                path: path.clone(),
                source,
            })?;
        debug!(file = template.path, "wrote template");
        files.push(PathBuf::from(template.path));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn tree(root: &Path) -> BTreeSet<String> {
        let mut entries = BTreeSet::new();
        let mut stack = vec![root.to_path_buf()];
        while let Some(dir) = stack.pop() {
            for entry in std::fs::read_dir(&dir).unwrap() {
                let path = entry.unwrap().path();
                let rel = path.strip_prefix(root).unwrap().to_string_lossy().into_owned();
                if path.is_dir() {
                    stack.push(path);
                    entries.insert(format!("{}/", rel));
                } else {
                    entries.insert(rel);
                }
            }
        }
        entries
    }

    #[test]
    fn test_name_validation() {
        assert!(is_valid_project_name("my_app"));
        assert!(is_valid_project_name("my-app2"));
        assert!(is_valid_project_name("App"));
        assert!(!is_valid_project_name(""));
        assert!(!is_valid_project_name("my app"));
        assert!(!is_valid_project_name("a/b"));
        assert!(!is_valid_project_name("../x"));
        assert!(!is_valid_project_name("café"));
    }

    #[tokio::test]
    async fn test_creates_fixed_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let report = create_project(tmp.path(), "demo_app").await.unwrap();

        assert_eq!(report.root, tmp.path().join("demo_app"));
        let expected: BTreeSet<String> = [
            "lib/",
            "web/",
            "linux/",
            "assets/",
            "examples/",
            ".fern/",
            "fern.yaml",
            "lib/main.cpp",
            "README.md",
            ".gitignore",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(tree(&report.root), expected);
        assert_eq!(report.files.len(), 4);
        assert_eq!(report.directories.len(), 6);
    }

    #[tokio::test]
    async fn test_name_substituted_everywhere() {
        let tmp = tempfile::tempdir().unwrap();
        let report = create_project(tmp.path(), "sprouty").await.unwrap();

        for template in PROJECT_TEMPLATES {
            let written = std::fs::read_to_string(report.root.join(template.path)).unwrap();
            assert_eq!(written, template.content.replace("{name}", "sprouty"));
            assert!(!written.contains("{name}"));
        }

        let manifest = std::fs::read_to_string(report.root.join("fern.yaml")).unwrap();
        assert!(manifest.starts_with("name: sprouty\n"));
        let readme = std::fs::read_to_string(report.root.join("README.md")).unwrap();
        assert!(readme.starts_with("# sprouty"));
    }

    #[tokio::test]
    async fn test_invalid_name_touches_nothing() {
        let tmp = tempfile::tempdir().unwrap();

        for name in ["my app", "a/b", ""] {
            let err = create_project(tmp.path(), name).await.unwrap_err();
            assert!(matches!(err, FernError::InvalidName { .. }), "{}", name);
        }
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_existing_entry_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("taken"), "keep me").unwrap();

        let err = create_project(tmp.path(), "taken").await.unwrap_err();
        assert!(matches!(err, FernError::AlreadyExists { .. }));
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("taken")).unwrap(),
            "keep me"
        );
    }

    #[tokio::test]
    async fn test_write_failure_keeps_earlier_files() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        // A regular file where the lib/ directory should be
        std::fs::write(root.join("lib"), "").unwrap();

        let err = write_templates(root, "broken", PROJECT_TEMPLATES)
            .await
            .unwrap_err();

        match &err {
            FernError::PartialScaffoldWrite { path, .. } => {
                assert_eq!(path, &root.join("lib").join("main.cpp"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.exit_code(), 11);
        let manifest = std::fs::read_to_string(root.join("fern.yaml")).unwrap();
        assert!(manifest.starts_with("name: broken\n"));
        assert!(!root.join("README.md").exists());
    }

    #[tokio::test]
    async fn test_missing_parent_is_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = create_project(&tmp.path().join("missing"), "demo")
            .await
            .unwrap_err();
        assert!(matches!(err, FernError::Io(_)));
    }
}
