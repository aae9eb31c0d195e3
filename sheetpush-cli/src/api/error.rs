use thiserror::Error;

/// Failure of a single remote write
///
/// The display text is the message recorded against the failed row.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemoteError {
    /// Operation-level errors returned in the response payload
    #[error("{}", .0.join("; "))]
    Operation(Vec<String>),

    /// Non-success HTTP status with no operation-level message
    #[error("GraphQL Error (Code: {status})")]
    Status { status: u16 },

    /// Successful status but no `data` payload
    #[error("GraphQL Error (Code: {status}): response contained no data")]
    MissingData { status: u16 },

    /// Response body was not valid JSON
    #[error("Invalid response body: {0}")]
    InvalidResponse(String),

    /// Connection, TLS, timeout or request-building failure
    #[error("{0}")]
    Transport(String),

    #[error("Unknown error")]
    Unknown,
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("Request timed out: {}", err)
        } else {
            err.to_string()
        };

        if message.is_empty() {
            RemoteError::Unknown
        } else {
            RemoteError::Transport(message)
        }
    }
}
