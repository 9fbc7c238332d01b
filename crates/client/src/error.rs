/// Errors returned by [`crate::HosteliaClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with an error envelope.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request was rejected with 401 while a session token was attached.
    #[error("Session expired; please log in again")]
    SessionExpired,

    /// The body was not a well-formed `{ success, data }` envelope.
    #[error("Malformed response: {0}")]
    Envelope(String),
}

impl ClientError {
    /// HTTP status for errors the server reported.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::SessionExpired => Some(401),
            _ => None,
        }
    }
}
