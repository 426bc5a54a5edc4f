use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

use crate::error::LocatorError;
use crate::query::ParameterError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(#[from] ParameterError),

    #[error("Charger service unavailable: {0}")]
    Upstream(LocatorError),
}

impl From<LocatorError> for AppError {
    fn from(err: LocatorError) -> Self {
        match err {
            LocatorError::Parameter(p) => AppError::BadRequest(p),
            other => AppError::Upstream(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::BadRequest { .. } => {
                warn!(error = %self, "Rejected charger query");
                StatusCode::BAD_REQUEST
            }
            AppError::Upstream { .. } => {
                error!(error = %self, "Charger lookup failed");
                StatusCode::BAD_GATEWAY
            }
        };

        (status, self.to_string()).into_response()
    }
}
