//! Project manifest (`fern.yaml`) types and parsing
//!
//! Only the presence of the manifest matters for detection. Its contents are read
//! for display and for the version compatibility warning.

use super::MARKER_FILE;
use crate::error::{FernError, Result};
use semver::{Version, VersionReq};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Per-platform settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSettings {
    #[serde(default)]
    pub enabled: bool,

    /// Dev server port (web only)
    #[serde(default)]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platforms {
    #[serde(default)]
    pub web: Option<PlatformSettings>,

    #[serde(default)]
    pub linux: Option<PlatformSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSettings {
    #[serde(default)]
    pub incremental: bool,

    #[serde(default)]
    pub optimize: bool,
}

/// Contents of `fern.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectManifest {
    pub name: String,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Dependency name to semver requirement
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,

    #[serde(default)]
    pub platforms: Platforms,

    #[serde(default)]
    pub build: BuildSettings,
}

impl ProjectManifest {
    /// Parse manifest text
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| FernError::Config(format!("Failed to parse {}: {}", MARKER_FILE, e)))
    }

    /// Read and parse the manifest in a project root
    pub fn load(root: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(root.join(MARKER_FILE))?;
        Self::parse(&content)
    }

    /// Declared requirement on the Fern library, if any
    pub fn fern_requirement(&self) -> Option<&str> {
        self.dependencies.get("fern").map(String::as_str)
    }

    /// Compare this CLI's version against the project's `fern` requirement
    ///
    /// Returns a warning message when the requirement is not satisfied. Unparseable
    /// versions or requirements produce no warning.
    pub fn check_compatibility(&self, cli_version: &str) -> Option<String> {
        let requirement = self.fern_requirement()?;
        let req = VersionReq::parse(requirement).ok()?;
        let version = Version::parse(cli_version.strip_prefix('v').unwrap_or(cli_version)).ok()?;

        if req.matches(&version) {
            None
        } else {
            Some(format!(
                "Project '{}' requires fern {}, but this CLI is version {}",
                self.name, requirement, cli_version
            ))
        }
    }
}
