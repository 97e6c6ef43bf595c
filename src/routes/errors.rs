use actix_web::error::{BlockingError, InternalError};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpRequest, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dto::FieldMessage;
use crate::services::ServiceError;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardError {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
    /// Per-field failures, present only for validation errors.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldMessage>,
}

impl StandardError {
    pub fn new(
        status: StatusCode,
        error: impl Into<String>,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: error.into(),
            message: message.into(),
            path: path.into(),
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<FieldMessage>) -> Self {
        self.errors = errors;
        self
    }

    pub fn into_response(self) -> HttpResponse {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        HttpResponse::build(status).json(self)
    }
}

/// Maps a service failure onto the HTTP status and body the client sees.
pub fn service_error_response(err: ServiceError, req: &HttpRequest) -> HttpResponse {
    let path = req.path();

    match err {
        ServiceError::ResourceNotFound(message) => {
            StandardError::new(StatusCode::NOT_FOUND, "Resource not found", message, path)
                .into_response()
        }
        ServiceError::DatabaseIntegrityViolation(message) => {
            StandardError::new(StatusCode::BAD_REQUEST, "Database exception", message, path)
                .into_response()
        }
        ServiceError::Validation(errors) => StandardError::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Validation exception",
            "Invalid data",
            path,
        )
        .with_errors(errors)
        .into_response(),
        ServiceError::Repository(err) => {
            log::error!("Request to {path} failed: {err}");
            StandardError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error",
                "Unexpected error",
                path,
            )
            .into_response()
        }
    }
}

/// Response for a service call whose blocking task could not complete.
pub fn blocking_error_response(err: BlockingError, req: &HttpRequest) -> HttpResponse {
    let path = req.path();
    log::error!("Blocking task for {path} failed: {err}");

    StandardError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error",
        "Unexpected error",
        path,
    )
    .into_response()
}

/// Turns malformed JSON bodies and query strings into `StandardError` responses.
pub fn bad_request_handler<E>(err: E, req: &HttpRequest) -> Error
where
    E: std::fmt::Display + std::fmt::Debug + 'static,
{
    let response = StandardError::new(
        StatusCode::BAD_REQUEST,
        "Bad request",
        err.to_string(),
        req.path(),
    )
    .into_response();

    InternalError::from_response(err, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::test::TestRequest;

    use crate::repository::RepositoryError;

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = to_bytes(response.into_body()).await.expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[actix_web::test]
    async fn not_found_maps_to_404() {
        let req = TestRequest::get().uri("/products/1000").to_http_request();

        let response =
            service_error_response(ServiceError::not_found("Entity not found"), &req);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["status"], 404);
        assert_eq!(body["path"], "/products/1000");
        assert!(body.get("errors").is_none());
    }

    #[actix_web::test]
    async fn integrity_violation_maps_to_400() {
        let req = TestRequest::delete().uri("/categories/1").to_http_request();

        let response = service_error_response(
            ServiceError::DatabaseIntegrityViolation("Integrity violation".to_string()),
            &req,
        );

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn validation_maps_to_422_with_field_errors() {
        let req = TestRequest::post().uri("/products").to_http_request();

        let response = service_error_response(
            ServiceError::validation("name", "must not be blank"),
            &req,
        );

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = body_json(response).await;
        assert_eq!(body["errors"][0]["fieldName"], "name");
    }

    #[actix_web::test]
    async fn repository_failures_map_to_500() {
        let req = TestRequest::get().uri("/products").to_http_request();

        let response = service_error_response(
            ServiceError::Repository(RepositoryError::Conflict("duplicate".to_string())),
            &req,
        );

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
