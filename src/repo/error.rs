use std::path::PathBuf;

use thiserror::Error;

/// Describes the potential error conditions that might arise from litt repository operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A path that should be (or become) a directory exists as something else.
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// `init` was pointed at a directory that already has content.
    #[error("{} is not empty", .0.display())]
    NotEmpty(PathBuf),

    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("configuration file missing: {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("unsupported repositoryformatversion {0}")]
    UnsupportedVersion(String),

    /// No repository was found in the given directory or any of its parents.
    #[error("not a git repository (or any of the parent directories): {}", .0.display())]
    NotFound(PathBuf),

    #[error("bad config line {line}: {message}")]
    ConfigParse { line: usize, message: String },

    #[error("config value {section}.{key} is missing")]
    MissingConfigValue { section: String, key: String },

    #[error("bad boolean config value '{value}' for {section}.{key}")]
    InvalidBool {
        section: String,
        key: String,
        value: String,
    },

    /// A value handed to `Config::set` that the config file can't represent.
    #[error("cannot set {section}.{key}: {reason}")]
    InvalidConfigEntry {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// A specialized `Result` type for litt repository operations.
pub type Result<T> = std::result::Result<T, Error>;
