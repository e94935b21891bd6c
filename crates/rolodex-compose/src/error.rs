//! Error types for compose operations.

/// Result type alias for compose operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Compose error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Subject or message body is blank.
    #[error("Please fill in both subject and message")]
    EmptyMessage,

    /// Recipient address is blank.
    #[error("Recipient address is required")]
    EmptyRecipient,

    /// Compose endpoint is not an http(s) URL.
    #[error("Invalid compose URL: {0}")]
    InvalidComposeUrl(String),

    /// URL parsing error.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Malformed percent-encoding.
    #[error("Invalid percent-encoding: {0}")]
    Decode(String),
}

impl Error {
    /// Returns true if the user can fix this by editing the compose form.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::EmptyMessage | Self::EmptyRecipient)
    }
}
