//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: engine error (unknown shader, bad parameters, bad dimensions)
//! - 11: file error (scene or sprite unreadable, frame not writable)
//! - 12: input error (malformed scene file, bad flag value)
//! - 13: output encoding error (JSON report)

use std::path::{Path, PathBuf};
use tessel_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("cannot read {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    #[error("cannot write {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },

    /// The scene file was readable but is not a valid scene document.
    #[error("invalid scene {}: {reason}", path.display())]
    Scene { path: PathBuf, reason: String },

    /// A flag value the CLI parses itself (`--params`, colors) was rejected.
    #[error("invalid --{flag}: {reason}")]
    Flag { flag: &'static str, reason: String },

    #[error("cannot encode report: {0}")]
    Report(#[from] serde_json::Error),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(EngineError::Io(_)) => 11,
            CliError::Engine(_) => 10,
            CliError::Read { .. } | CliError::Write { .. } => 11,
            CliError::Scene { .. } | CliError::Flag { .. } => 12,
            CliError::Report(_) => 13,
        }
    }

    /// The file the failure concerns, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            CliError::Read { path, .. }
            | CliError::Write { path, .. }
            | CliError::Scene { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Maps I/O failures of an engine call reading `path` to [`CliError::Read`].
    /// Other engine errors keep their engine exit code.
    pub fn on_read(path: &Path) -> impl FnOnce(EngineError) -> CliError + '_ {
        move |err| match err {
            EngineError::Io(reason) => CliError::Read {
                path: path.to_path_buf(),
                reason,
            },
            other => CliError::Engine(other),
        }
    }

    /// Like [`CliError::on_read`], for engine calls writing `path`.
    pub fn on_write(path: &Path) -> impl FnOnce(EngineError) -> CliError + '_ {
        move |err| match err {
            EngineError::Io(reason) => CliError::Write {
                path: path.to_path_buf(),
                reason,
            },
            other => CliError::Engine(other),
        }
    }

    pub fn flag(flag: &'static str, reason: impl ToString) -> Self {
        CliError::Flag {
            flag,
            reason: reason.to_string(),
        }
    }
}
