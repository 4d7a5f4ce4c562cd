use thiserror::Error;

use crate::storage::StorageError;

/// Result type used across the SDK.
pub type Result<T> = std::result::Result<T, TicketKitError>;

/// Errors surfaced by the ticketkit SDK.
#[derive(Debug, Error)]
pub enum TicketKitError {
    /// The server answered with a non-success status. The message is taken
    /// from the response body when one is present, otherwise from the
    /// status line.
    #[error("{message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Server-reported or fallback error message.
        message: String,
    },

    /// Connection-level failure: the server could not be reached at all.
    /// Distinct from [`TicketKitError::Api`], which carries a server reply.
    #[error("network error: unable to reach {url}: {error}")]
    Network {
        /// The URL that could not be reached.
        url: String,
        /// Underlying transport error.
        error: String,
    },

    /// The access token expired and refreshing it failed. The caller must
    /// log in again.
    #[error("session expired, please log in again")]
    SessionExpired,

    /// A refresh was requested but no refresh token is stored.
    #[error("no refresh token available")]
    MissingRefreshToken,

    /// The durable token store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A request body could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    UnexpectedResponse(String),
}

impl TicketKitError {
    /// Whether the error means the credential itself was rejected, as
    /// opposed to a transient or network failure. Auth-fatal errors are
    /// never retried.
    #[must_use]
    pub fn is_auth_fatal(&self) -> bool {
        match self {
            Self::Api { status, message } => {
                matches!(*status, 401 | 403)
                    || message.contains("Unauthorized")
                    || message.contains("Forbidden")
            }
            _ => false,
        }
    }

    /// Whether the error is the backend's expired-access-token signal.
    ///
    /// The backend reports expiry only through its message text ("Token has
    /// expired"); there is no structured error code. The case-sensitive
    /// substring match is part of the server contract and must not be
    /// loosened without renegotiating it.
    pub(crate) fn is_token_expired(&self) -> bool {
        matches!(self, Self::Api { status: 401, message } if message.contains("expired"))
    }
}
