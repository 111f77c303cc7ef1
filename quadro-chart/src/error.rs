//! Error types for chart rendering.

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, ChartError>;

/// Main error type for chart rendering.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// A required field is absent or has the wrong type mid-render. The
    /// renderer refuses to emit a partial chart.
    #[error("Malformed chart payload: {0}")]
    MalformedPayload(String),

    /// Backend drawing errors
    #[error("Drawing error: {0}")]
    Drawing(String),

    /// PNG encoding errors
    #[error("Image encoding error: {0}")]
    Encode(#[from] image::ImageError),
}

impl ChartError {
    /// Create a new malformed-payload error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedPayload(msg.into())
    }

    /// Wrap a backend drawing error
    pub fn drawing(err: impl std::fmt::Display) -> Self {
        Self::Drawing(err.to_string())
    }
}
