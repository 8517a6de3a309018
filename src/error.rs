use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("initial password appears to have been already changed: {} not found", .0.display())]
    InitialPassword(PathBuf),

    #[error("repo_type should be one of pypi, r, apt, got: {0}")]
    RepositoryType(String),

    #[error("package allowlist file {} does not exist", .0.display())]
    AllowlistNotFound(PathBuf),

    #[error("invalid package name {0:?}: quotes and backslashes are not allowed")]
    InvalidPackageName(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
