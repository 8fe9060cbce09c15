use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnhanceError {
    #[error("No API key found in environment variable {0}")]
    MissingCredential(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Unknown tone: {0}")]
    UnknownTone(String),

    #[error("Enhancement failed: {0}")]
    Generic(String),
}

pub type EnhanceResult<T> = Result<T, EnhanceError>;
