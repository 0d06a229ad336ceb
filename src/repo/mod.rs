//! Represents a git-like repository stored on the local file system.
//!
//! The central type is [`OnDisk`], a handle on an opened repository. It is
//! produced by one of three entry points:
//!
//! * [`OnDisk::init`] creates a brand-new repository,
//! * [`OnDisk::open`] opens the repository rooted at an exact path,
//! * [`OnDisk::discover`] walks upward from a path to the nearest repository.
//!
//! Opening an existing repository is always strict: the metadata directory must
//! exist and its [`Config`] must declare a supported format version.

mod config;
pub use config::{Config, Section};

mod error;
pub use error::{Error, Result};

pub mod on_disk;
pub use on_disk::OnDisk;

/// Name of the metadata directory inside each working directory.
pub const GIT_DIR_NAME: &str = ".git";

/// The only `core.repositoryformatversion` this crate understands.
pub const REPOSITORY_FORMAT_VERSION: u32 = 0;
