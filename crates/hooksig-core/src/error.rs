//! Error types for the hooksig core.

/// Core error type for hooksig infrastructure.
#[derive(Debug, thiserror::Error)]
pub enum HookSigError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error with context.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience result type for hooksig operations.
pub type HookSigResult<T> = Result<T, HookSigError>;
