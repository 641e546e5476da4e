use thiserror::Error;

/// Library error type for mediashow operations.
///
/// Only the I/O-facing collaborators (catalog scan, settings persistence)
/// produce these. Engine operations are total over their state space and
/// never fail.
#[derive(Debug, Error)]
pub enum Error {
    /// The media folder is missing, not a directory, or unreadable.
    #[error("invalid media folder: {0}")]
    BadDir(String),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde settings error.
    #[error(transparent)]
    Settings(#[from] serde_yaml::Error),
}
