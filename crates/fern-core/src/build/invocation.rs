//! Compiler command line assembly

use crate::config::BuildConfiguration;
use crate::error::{FernError, Result};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

/// Source file to compile and where the executable goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileTarget {
    pub source: PathBuf,
    pub output: PathBuf,
}

impl CompileTarget {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
        }
    }

    /// Single-file target: `<dir>/<stem>_temp` next to the source
    pub fn single_file(source: &Path) -> Self {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output = source.with_file_name(format!("{}_temp", stem));
        Self::new(source, output)
    }
}

/// Ordered compiler argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub program: String,
    pub args: Vec<OsString>,
}

impl CommandInvocation {
    /// Full argument vector including the program name
    pub fn argv(&self) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(OsString::from(&self.program));
        argv.extend(self.args.iter().cloned());
        argv
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Assemble the compiler invocation for a target
///
/// Order: compiler, flags, `-I path` pairs, source, `-L path` pairs, `-l name`
/// pairs, `-o output`. Libraries always trail the source file.
pub fn build_invocation(
    config: &BuildConfiguration,
    target: &CompileTarget,
) -> Result<CommandInvocation> {
    if !config.installed {
        return Err(FernError::ToolchainNotInstalled);
    }

    let mut args: Vec<OsString> = Vec::new();

    args.extend(config.flags.iter().map(OsString::from));

    for include_path in &config.include_paths {
        args.push("-I".into());
        args.push(include_path.into());
    }

    args.push(target.source.clone().into());

    for lib_path in &config.library_paths {
        args.push("-L".into());
        args.push(lib_path.into());
    }

    for lib in &config.libraries {
        args.push("-l".into());
        args.push(lib.into());
    }

    args.push("-o".into());
    args.push(target.output.clone().into());

    Ok(CommandInvocation {
        program: config.compiler.clone(),
        args,
    })
}
