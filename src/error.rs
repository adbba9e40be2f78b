use thiserror::Error;

/// Field-level failures raised locally, before any remote call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is empty or whitespace-only.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The date field was left unset.
    #[error("date is required")]
    MissingDate,

    /// The URL field does not parse as an absolute URL.
    #[error("not a valid absolute URL: {0}")]
    InvalidUrl(String),
}

/// Failures surfaced by the remote backend or its transport.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The backend has no development with this id.
    #[error("development {0} not found")]
    NotFound(u64),

    /// The backend rejected the call with a non-success status.
    #[error("backend returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// The request never completed (connection, TLS, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the wire contract.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The response was well-formed but violated an invariant of the
    /// contract, e.g. guidance for a category other than the one requested.
    #[error("protocol violation: {0}")]
    Protocol(String),
}

/// Unified error for the query/mutation layers. Absent results are not
/// errors; they come back as `Option` or an explicit variant.
#[derive(Debug, Error)]
pub enum PortalError {
    /// Rejected locally; the backend was never contacted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The backend client handle has not been connected yet.
    #[error("backend client is not ready")]
    ClientUnavailable,

    /// The backend rejected the call; the caller may resubmit.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl PortalError {
    /// True when the failure never left this process.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            PortalError::Validation(_) | PortalError::ClientUnavailable
        )
    }
}
