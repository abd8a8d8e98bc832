#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No response reached the caller (network failure, timeout, cancellation).
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The service answered with a status outside 200-299.
    /// `message` is extracted from the `message` field of the JSON body when possible.
    #[error("Service error (HTTP {status}): {message}")]
    Service {
        status: u16,
        message: String,
        body: String,
    },

    /// A required caller-supplied field is empty.
    #[error("Missing required field: {field}")]
    Validation { field: &'static str },

    /// Only GET and POST are supported.
    #[error("Unsupported request verb: {0}")]
    UnsupportedVerb(String),

    /// The API endpoint and path do not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A background send was requested outside a tokio runtime.
    #[error("No tokio runtime available to send the request")]
    NoRuntime,

    /// The token store failed to load or persist the token.
    #[error("Token store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A payload could not be decoded into the requested record.
    #[error("Failed to decode payload: {0}")]
    Decode(#[from] serde_json::Error),
}
