//! Client error type.

use crate::form::FormErrors;

/// Failures surfaced by the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The request never produced an HTTP response.
    #[error("{message}")]
    Transport {
        /// Transport failure description.
        message: String,
    },
    /// The server answered with an unsuccessful envelope.
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Envelope message.
        message: String,
    },
    /// The response body was not a valid envelope.
    #[error("unexpected response ({status}): {message}")]
    Decode {
        /// HTTP status code.
        status: u16,
        /// Decoder message.
        message: String,
    },
    /// The form failed local validation; nothing was sent.
    #[error("form is invalid: {0}")]
    InvalidForm(FormErrors),
    /// An update was submitted with no student selected for editing.
    #[error("no student is being edited")]
    NotEditing,
    /// The user declined the confirmation prompt.
    #[error("cancelled")]
    Cancelled,
    /// Client configuration is invalid.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Build a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Build a server error.
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }
}
