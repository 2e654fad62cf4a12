use crate::helpers::error_chain;

/// Errors that can occur while talking to the scheduler REST API.
#[derive(Debug, thiserror::Error)]
pub enum ConnectorError {
    /// Request never produced a response: DNS, TCP, TLS or timeout failure.
    #[error("{0}")]
    Transport(String),
    /// Scheduler answered with a non-2xx status.
    #[error("{method} {url}: unexpected status {status}: {body}")]
    Status {
        method: String,
        url: String,
        status: u16,
        body: String,
    },
    /// Response body could not be decoded.
    #[error("invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },
}

impl ConnectorError {
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(error_chain(&err))
    }
}
