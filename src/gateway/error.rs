use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::search::SearchError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Error body: human message plus a stable machine-readable code.
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl GatewayError {
    fn code(&self) -> &'static str {
        match self {
            GatewayError::Search(e) => e.code(),
            GatewayError::Internal(_) => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            GatewayError::Search(e) => match e.code() {
                "invalid_query" => StatusCode::BAD_REQUEST,
                "buyer_not_found" => StatusCode::NOT_FOUND,
                "upstream_error" => StatusCode::BAD_GATEWAY,
                // data_integrity, embedding_error
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            GatewayError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.code(),
        });

        (status, body).into_response()
    }
}
