use thiserror::Error;

/// Core error type shared across sampleforge crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The declaration description violates internal invariants.
    #[error("invalid declaration: {0}")]
    InvalidDeclaration(String),
    /// A requested feature is not supported.
    #[error("unsupported: {0}")]
    Unsupported(String),
    /// Catch-all error for unexpected failures.
    #[error("other error: {0}")]
    Other(String),
}

/// Convenience alias for results returned by sampleforge crates.
pub type Result<T> = std::result::Result<T, Error>;
