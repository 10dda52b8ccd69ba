/// Convenience result type used across the crate.
pub type NeedleResult<T> = Result<T, NeedleError>;

/// Error taxonomy for the fallible edges of the crate.
///
/// Sprite generation and cache lookups never fail; errors only come from decoding
/// base images, validating geometry and setting up worker pools.
#[derive(thiserror::Error, Debug)]
pub enum NeedleError {
    /// Invalid user-provided geometry or options.
    #[error("validation error: {0}")]
    Validation(String),

    /// Base image bytes could not be turned into a raster.
    #[error("decode error: {0}")]
    Decode(String),

    /// Worker pool or single-flight bookkeeping failed.
    #[error("concurrency error: {0}")]
    Concurrency(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl NeedleError {
    /// Build a [`NeedleError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`NeedleError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Build a [`NeedleError::Concurrency`] value.
    pub fn concurrency(msg: impl Into<String>) -> Self {
        Self::Concurrency(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
