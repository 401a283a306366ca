use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server answered with status {status}")]
    Status { status: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    #[error("document has not finished loading")]
    NotReady,
    #[error("form #{form_id} not found in document")]
    FormNotFound { form_id: String },
}
