use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::ActivityError;

impl ActivityError {
    pub fn status(&self) -> StatusCode {
        match self {
            ActivityError::NotFound { .. } => StatusCode::NOT_FOUND,
            ActivityError::AlreadyRegistered { .. } | ActivityError::NotRegistered { .. } => {
                StatusCode::BAD_REQUEST
            }
            ActivityError::MissingEmail | ActivityError::InvalidQuery { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }
}

impl IntoResponse for ActivityError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
