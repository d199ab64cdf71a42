/// Convenience result type used across tokenforge.
pub type TokenResult<T> = Result<T, TokenError>;

/// Top-level error taxonomy used by the compositor APIs.
///
/// Every variant is a local, synchronous failure. Retrying the same call with the same
/// input fails the same way; callers correct the input instead.
#[derive(thiserror::Error, Debug)]
pub enum TokenError {
    /// Zero-area, undecoded, or malformed source image.
    #[error("invalid source: {0}")]
    InvalidSource(String),

    /// Unusable style parameters (output size, ring widths, vignette radius).
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Non-finite or non-positive zoom, or non-finite pan offset.
    #[error("invalid transform: {0}")]
    InvalidTransform(String),

    /// The image backend could not serialize a rendered token.
    #[error("encode error: {0}")]
    Encode(String),

    /// Errors when serializing or deserializing style files.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TokenError {
    /// Build a [`TokenError::InvalidSource`] value.
    pub fn invalid_source(msg: impl Into<String>) -> Self {
        Self::InvalidSource(msg.into())
    }

    /// Build a [`TokenError::InvalidConfig`] value.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Build a [`TokenError::InvalidTransform`] value.
    pub fn invalid_transform(msg: impl Into<String>) -> Self {
        Self::InvalidTransform(msg.into())
    }

    /// Build a [`TokenError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`TokenError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
