// ABOUTME: Error taxonomy for engine operations.
// ABOUTME: Separates transport failures, engine-reported failures and cancellation.

use thiserror::Error;

/// Errors from connector operations.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Connection refused, reset or timed out.
    #[error("transport error: {0}")]
    Transport(String),

    /// The engine reported a failure in its progress stream. The message is verbatim.
    #[error("{0}")]
    RemoteOperation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("operation cancelled")]
    Cancelled,

    /// The engine rejected the request before streaming anything.
    #[error("engine returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The engine sent something that is not valid API output.
    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("failed to prepare build context: {0}")]
    BuildContext(#[source] std::io::Error),
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    RemoteOperation,
    NotFound,
    Cancelled,
    Api,
    Protocol,
    BuildContext,
}

impl ConnectorError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConnectorError::Transport(_) => ErrorKind::Transport,
            ConnectorError::RemoteOperation(_) => ErrorKind::RemoteOperation,
            ConnectorError::NotFound(_) => ErrorKind::NotFound,
            ConnectorError::Cancelled => ErrorKind::Cancelled,
            ConnectorError::Api { .. } => ErrorKind::Api,
            ConnectorError::Protocol(_) => ErrorKind::Protocol,
            ConnectorError::BuildContext(_) => ErrorKind::BuildContext,
        }
    }

    /// True for connection-level failures.
    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}
