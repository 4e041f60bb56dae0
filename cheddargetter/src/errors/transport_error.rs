/// Errors reaching the service or reading what it sent back.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Could not reach the service: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Service replied with HTTP {status}")]
    Status { status: u16, body: String },
    #[error("Service replied with malformed XML: {0}")]
    MalformedXml(String),
    #[error("Credentials can't be sent in an HTTP header")]
    InvalidCredentials,
    #[error("Could not create runtime")]
    CouldNotCreateRuntime,
}
