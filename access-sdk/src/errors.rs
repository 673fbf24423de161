use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkErrors {
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error(transparent)]
    UrlParseError(#[from] url::ParseError),
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error("invalid access key: {0}")]
    InvalidAccessKey(String),
    #[error("request rejected with status {status}: {message}")]
    Rejected { status: u16, message: String },
    #[error("client is not authenticated, call auth first")]
    NotAuthenticated,
}
