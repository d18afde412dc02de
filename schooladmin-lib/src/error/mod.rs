//! Error types

mod api;

pub use api::*;

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A request to the backend failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The client was configured with values it cannot use.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Normalizes the error into the single line shown inline on a page.
    ///
    /// Error envelopes surface their message verbatim; transport and status
    /// failures read as "Failed to fetch {what}".
    pub fn user_message(&self, what: &str) -> String {
        match self {
            Self::Api(ApiError::Envelope { message }) if !message.is_empty() => message.clone(),
            Self::Api(ApiError::Envelope { .. }) => "An error occurred".to_string(),
            Self::Api(ApiError::Http { status, .. }) => {
                format!("Failed to fetch {} (HTTP {})", what, status)
            }
            Self::Api(ApiError::Timeout(_)) => format!("Failed to fetch {}: request timed out", what),
            Self::Api(ApiError::Network(_)) => format!("Failed to fetch {}: backend unreachable", what),
            Self::Api(ApiError::Parse { .. }) => format!("Failed to fetch {}: unexpected response", what),
            Self::Api(ApiError::InvalidUrl(url)) => format!("Failed to fetch {}: invalid URL {}", what, url),
            Self::Config(message) => message.clone(),
        }
    }
}
