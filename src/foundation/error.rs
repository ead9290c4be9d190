/// Convenience result type used across slidereel.
pub type ReelResult<T> = Result<T, ReelError>;

/// Top-level error taxonomy used by the timeline and layout APIs.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Configuration that cannot be evaluated (bad ranges, column counts, policies).
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The allocated timeline length disagrees with the declared composition duration.
    #[error("timeline mismatch: declared {declared} frames, allocated {computed} frames")]
    TimelineMismatch {
        /// Duration declared by the composition config.
        declared: u64,
        /// Duration computed by the allocator (intro plus all windows).
        computed: u64,
    },

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::InvalidConfig`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Build a [`ReelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
