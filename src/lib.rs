//! `litt` is a small, git-like version control tool.
//!
//! This crate currently provides the repository bootstrap layer: creating an
//! empty repository, finding the repository that encloses a given path, and
//! reading and writing the repository's `config` file. Object storage, refs,
//! and history are expected to build on the [`repo::OnDisk`] handle.

pub mod repo;

#[cfg(test)]
mod test_support;
