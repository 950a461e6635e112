/// Error types for storage, rule syncing and the add-site flow
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("failed to read storage: {0}")]
    Read(String),
    #[error("failed to write storage: {0}")]
    Write(String),
    #[error("failed to decode stored data: {0}")]
    Decode(String),
}

/// Failures reported by (or on the way to) the platform rule table
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuleError {
    #[error("failed to read dynamic rules: {0}")]
    Read(String),
    #[error("failed to update dynamic rules: {0}")]
    Update(String),
    #[error("{requested} rules requested but the platform allows at most {limit}")]
    QuotaExceeded { requested: usize, limit: usize },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Rejections from the add/remove flow. The `Display` text is shown to the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SiteError {
    #[error("Please enter a website to block.")]
    EmptyInput,
    #[error("Please enter a valid URL. Example: example.com")]
    InvalidHostname(String),
    #[error("This website is already in the block list.")]
    AlreadyExists(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
