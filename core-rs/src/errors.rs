//! Error types for the project type registry

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Project type not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Unknown value provider: {0}")]
    UnknownValueProvider(String),
}

/// Failure reported by an external value provider.
///
/// The registry never invokes providers, so it never produces this error
/// itself; it only defines the boundary type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Value storage error: {0}")]
pub struct ValueStorageError(pub String);

impl ValueStorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub type Result<T> = std::result::Result<T, RegistryError>;
