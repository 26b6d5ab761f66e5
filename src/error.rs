use reqwest::StatusCode;
use thiserror::Error;

pub use anyhow::Context;

pub type Result<T> = std::result::Result<T, FxError>;

#[derive(Debug, Error)]
pub enum FxError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("upstream API returned {status}: {body}")]
    Upstream { status: StatusCode, body: String },
    #[error("rate limit retry budget exhausted after {attempts} attempts")]
    RateLimited { attempts: u32 },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FxError {
    pub fn message<T: Into<String>>(msg: T) -> Self {
        FxError::Message(msg.into())
    }

    pub fn invalid_argument<T: Into<String>>(msg: T) -> Self {
        FxError::InvalidArgument(msg.into())
    }
}
