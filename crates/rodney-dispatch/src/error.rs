//! Dispatch error types.

/// Failures reported by a remote collaborator (executor or record source).
///
/// `Display` is the bare underlying message; callers add their own prefix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The request never got a response (network, TLS, timeout).
    #[error("{0}")]
    Transport(String),

    /// The remote answered with an error.
    #[error("{0}")]
    Remote(String),

    /// The response could not be understood.
    #[error("{0}")]
    Decode(String),

    /// The collaborator refused the request before sending it.
    #[error("{0}")]
    Rejected(String),
}

impl RemoteError {
    /// The underlying message, without any prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Transport(m) | Self::Remote(m) | Self::Decode(m) | Self::Rejected(m) => m,
        }
    }

    /// Returns `true` if the failure happened before the remote saw the
    /// request.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Errors from [`crate::RecordSession`] operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No record context or no loaded record yet.
    #[error("no record loaded")]
    NotReady,

    /// Another action is still in flight.
    #[error("an action is already running")]
    Busy,

    /// Fetching the record or its columns failed.
    #[error("failed to load record: {0}")]
    Fetch(#[from] RemoteError),
}
