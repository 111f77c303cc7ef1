//! Error types for the classification core.

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, QuadroError>;

/// Main error type for the classification core.
#[derive(Debug, thiserror::Error)]
pub enum QuadroError {
    /// The payload structurally committed to an archetype, but an element
    /// breaks that archetype's field contract.
    #[error("Malformed chart payload: {0}")]
    MalformedPayload(String),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuadroError {
    /// Create a new malformed-payload error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedPayload(msg.into())
    }
}
