use reqwest::StatusCode;
use thiserror::Error;

use crate::query::ParameterError;

#[derive(Debug, Error)]
pub enum LocatorError {
    /// Never carries the request URL, which holds the credential.
    #[error("upstream request failed: {0}")]
    Transport(reqwest::Error),

    #[error("upstream body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// `body` is a bounded excerpt kept for logs; it is not part of the message.
    #[error("upstream returned status {status}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

impl From<reqwest::Error> for LocatorError {
    fn from(err: reqwest::Error) -> Self {
        LocatorError::Transport(err.without_url())
    }
}
