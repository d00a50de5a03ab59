use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use claim_geo_application::error::AppError;

pub struct HttpError(pub AppError);

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        match app_error {
            AppError::Domain(_)
            | AppError::BadRequest { .. }
            | AppError::ValidationError { .. } => {
                debug!("Client error response generated: {}", app_error);
            }
            _ => {
                error!("Server error response generated: {}", app_error);
            }
        }

        let (status_code, message) = match app_error {
            AppError::Domain(e) => (StatusCode::BAD_REQUEST, e.to_string()),

            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),

            AppError::ValidationError { message } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message.clone())
            }

            AppError::ConfigError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
            ),

            AppError::UpstreamTimeout { .. } => {
                (StatusCode::GATEWAY_TIMEOUT, app_error.to_string())
            }

            AppError::UpstreamError { message } => (StatusCode::BAD_GATEWAY, message.clone()),
        };

        let error_response = json!({
            "ok": false,
            "error": message,
            "status": status_code.as_u16()
        });

        (status_code, Json(error_response)).into_response()
    }
}

impl From<AppError> for HttpError {
    fn from(app_error: AppError) -> Self {
        HttpError(app_error)
    }
}
