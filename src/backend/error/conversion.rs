/**
 * Error Conversion
 *
 * All backend errors implement `IntoResponse` from Axum, allowing them to be
 * returned directly from handlers.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "error": "Invalid input.",
 *   "reason": "validation_error",
 *   "status": 400,
 *   "fields": { "title": ["This field is required."] }
 * }
 * ```
 *
 * `fields` is only present for validation and conflict errors.
 */

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::BackendError;

impl BackendError {
    /// JSON body for this error
    pub fn body(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "error": self.message(),
            "reason": self.reason(),
            "status": self.status_code().as_u16(),
        });
        if let Some(fields) = self.field_errors() {
            body["fields"] = serde_json::to_value(fields).unwrap_or_default();
        }
        body
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "request rejected");
        }

        let mut response = (status, Json(self.body())).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
