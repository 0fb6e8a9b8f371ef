use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by the command line layer. Block stripping itself never fails.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Input source are empty.")]
    NoSources,

    #[error("Output file is empty.")]
    NoOutput,

    #[error("File not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Unknown option: {0}")]
    UnknownArgument(String),

    #[error("Failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Invalid package manifest {}: {source}", path.display())]
    Package {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid source pattern '{pattern}': {source}")]
    Glob {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("Could not launch {program}: {source}")]
    CompilerLaunch { program: String, source: io::Error },

    #[error("Closure Compiler failed ({status}):\n{stderr}")]
    CompilerFailed { status: ExitStatus, stderr: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}
