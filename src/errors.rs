use crate::models::responses::ErrorResponse;
use crate::models::storage::StorageError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid source '{0}': expected 'admin' or 'client'")]
    InvalidRole(String),
    #[error("invalid value '{value}' for parameter '{name}'")]
    InvalidParameter { name: &'static str, value: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SearchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SearchError::InvalidRole(_) | SearchError::InvalidParameter { .. } => {
                StatusCode::BAD_REQUEST
            }
            SearchError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Search failed: {}", self);
        } else {
            warn!("Rejected search request: {}", self);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });
        (status, body).into_response()
    }
}
