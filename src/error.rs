use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by the client and the stores.
#[derive(Error, Debug)]
pub enum Error {
    /// No usable response: connect failure, timeout at the transport, or an
    /// undecodable body.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status, with the server's structured message when it
    /// sent one.
    #[error("server error ({status})")]
    Server {
        status: StatusCode,
        message: Option<String>,
    },

    /// Draft rejected by boundary checks before any request was made.
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Guarded operation invoked without a logged-in session.
    #[error("not logged in")]
    Unauthorized,
}

impl Error {
    /// Structured message from the server, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Message stored on state: the server's own, or the operation fallback.
    pub fn surface(&self, fallback: &str) -> String {
        self.server_message()
            .map(str::to_owned)
            .unwrap_or_else(|| fallback.to_owned())
    }
}
