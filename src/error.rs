//! Error types for inbound payload decoding

use thiserror::Error;

/// Errors that can occur while reading an inbound webhook payload
#[derive(Error, Debug)]
pub enum Error {
    /// The webhook body is not a JSON object
    #[error("Invalid inbound payload: {0}")]
    InvalidPayload(String),

    /// Requested a property that is neither modeled nor present in the payload
    #[error("Unknown property '{0}'")]
    UnknownProperty(String),

    /// Attachment content could not be decoded
    #[error("Failed to decode content: {0}")]
    Decode(String),
}

/// Result type for inbound payload operations
pub type Result<T> = std::result::Result<T, Error>;
