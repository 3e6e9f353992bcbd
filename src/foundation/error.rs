/// Convenience result type used across avapair.
pub type AvatarResult<T> = Result<T, AvatarError>;

/// Top-level error taxonomy used by crate APIs.
///
/// Failures that occur inside the loader boundary (transport, decode, unwrap)
/// are absorbed there and logged; this type surfaces only at the public seams
/// that genuinely reject input, such as source construction and config parsing.
#[derive(thiserror::Error, Debug)]
pub enum AvatarError {
    /// Invalid user-provided configuration or path data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Transport-level failure while fetching image bytes.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Failure decoding fetched bytes into a bitmap.
    #[error("decode error: {0}")]
    Decode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AvatarError {
    /// Build an [`AvatarError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AvatarError::Fetch`] value.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Build an [`AvatarError::Decode`] value.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}
