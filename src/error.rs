//! Error type shared by the GitHub capability and the core operations

use thiserror::Error;

/// Any failure coming back from the GitHub API.
///
/// The walker and classifier never look inside it: the first error aborts
/// the whole top-level call and is handed back to the caller as is.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The request never produced a response (connect, TLS, timeout...)
    #[error("GitHub request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("GitHub API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// GraphQL `errors` array was present in the response
    #[error("GitHub GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// Response body did not match the expected shape
    #[error("Failed to decode GitHub response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid GitHub response: {0}")]
    InvalidResponse(String),

    /// Token or user agent cannot be sent as a header
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;
