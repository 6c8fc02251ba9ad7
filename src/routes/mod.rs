// Route exports
pub mod catalog;
pub mod clients;
pub mod health;
pub mod orders;
pub mod ratings;
pub mod sellers;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::sync::Arc;
use validator::ValidationErrors;

use crate::config::ProximitySettings;
use crate::models::ErrorResponse;
use crate::services::{PostgresClient, PostgresError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub proximity: ProximitySettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(sellers::configure)
            .configure(clients::configure)
            .configure(catalog::configure)
            .configure(ratings::configure)
            .configure(orders::configure),
    );
}

/// Extractor configuration so malformed bodies, query strings and path
/// segments all answer with an [`ErrorResponse`]
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .app_data(web::PathConfig::default().error_handler(handle_path_error));
}

/// JSON error wrapper for extractor failures
#[derive(Debug)]
pub struct JsonError(ErrorResponse);

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError(ErrorResponse {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    })
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    JsonError(ErrorResponse {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    })
    .into()
}

/// Handle path segment errors, e.g. a non-numeric id
pub fn handle_path_error(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    JsonError(ErrorResponse {
        error: "invalid_path".to_string(),
        message: format!("Invalid path: {}", err),
        status_code: 400,
    })
    .into()
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

pub(crate) fn validation_failed(errors: ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: {}", errors);
    error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string())
}

/// Translate a persistence error into an HTTP response
///
/// `context` names the failed operation, e.g. "Failed to fetch seller".
pub(crate) fn db_failure(context: &str, err: PostgresError) -> HttpResponse {
    let status = match &err {
        PostgresError::NotFound(_) | PostgresError::InvalidReference(_) => StatusCode::NOT_FOUND,
        PostgresError::Conflict(_) | PostgresError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        PostgresError::SqlxError(_) | PostgresError::MigrateError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!("{}: {}", context, err);
    } else {
        tracing::debug!("{}: {}", context, err);
    }

    error_response(status, context, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_failure_status_mapping() {
        let cases = [
            (PostgresError::NotFound("seller 1".into()), StatusCode::NOT_FOUND),
            (PostgresError::InvalidReference("fk".into()), StatusCode::NOT_FOUND),
            (PostgresError::Conflict("favorites_key".into()), StatusCode::BAD_REQUEST),
            (PostgresError::InvalidInput("no image".into()), StatusCode::BAD_REQUEST),
            (PostgresError::SqlxError(sqlx::Error::PoolTimedOut), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(db_failure("op", err).status(), expected);
        }
    }
}
