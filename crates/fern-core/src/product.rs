//! Product configuration trait for CLI binaries
//!
//! This trait defines the identity and user-facing text that the binary supplies
//! to the command front-end.

use std::path::Path;

/// Configuration trait for the CLI product
///
/// The binary implements this trait to define:
/// - Product identity (name, display name, version)
/// - Documentation links
/// - Post-create instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for the CLI command)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI version, compared against a project's `fern` requirement
    fn version(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, dir: &Path) -> Vec<String>;
}
