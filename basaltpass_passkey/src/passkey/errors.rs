use thiserror::Error;

use crate::utils::UtilError;

/// Errors raised while translating options or talking to the passkey server.
///
/// These are internal to a flow; callers of [`crate::PasskeyClient`] see them
/// normalized into [`crate::FlowError`].
#[derive(Debug, Error)]
pub enum PasskeyError {
    /// Error related to client configuration (e.g., an unparsable server URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A binary field in server-issued options was not valid Base64URL
    #[error("Invalid format: {0}")]
    Format(String),

    /// The server answered with a non-success status
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The request could not be sent or the response body could not be read
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Error from JSON serialization/deserialization
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Error from utility operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}
