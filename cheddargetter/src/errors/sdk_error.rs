use crate::errors::transport_error::TransportError;

/// Errors the SDK might return.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// The request never produced a usable response.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The service answered with an `<error>` element. `message` is its text, verbatim.
    #[error("{message}")]
    Remote {
        message: String,
        code: Option<String>,
    },
}

impl SdkError {
    /// Message of a remote error, if this is one.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            SdkError::Remote { message, .. } => Some(message),
            SdkError::Transport(_) => None,
        }
    }
}
