//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Every failure renders as the
//! `{ success: false, message, error? }` body the site's forms read, with the
//! status, client message and log level taken from [`ErrorMetadata`].

use axum::{
    extract::rejection::JsonRejection,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use liight_core::models::ApiMessage;
use liight_core::{AppError, ErrorMetadata, LogLevel};
use liight_storage::StorageError;
use serde::de::DeserializeOwned;

/// Generic `error` value for sensitive failures in production.
const GENERIC_ERROR_DETAIL: &str = "An unexpected error occurred";

/// Wrapper type for AppError to implement IntoResponse (orphan rules).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        })
    }
}

/// Map a storage failure onto the API taxonomy. A size overrun is the
/// client's fault (413); everything else is a server-side storage error.
pub fn storage_app_error(err: StorageError) -> AppError {
    match err {
        StorageError::LimitExceeded { limit } => AppError::PayloadTooLarge(format!(
            "File size exceeds the {}MB limit",
            limit / (1024 * 1024)
        )),
        StorageError::NotFound(key) => AppError::NotFound(key),
        other => AppError::Storage(other.to_string()),
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(storage_app_error(err))
    }
}

impl From<JsonRejection> for HttpAppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return HttpAppError(AppError::PayloadTooLarge(
                "Request body is too large".to_string(),
            ));
        }
        HttpAppError(AppError::InvalidInput(format!(
            "Invalid request body: {}",
            rejection.body_text()
        )))
    }
}

/// JSON body extractor that answers malformed bodies with the API's error shape.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = HttpAppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(inner) = Json::<T>::from_request(req, state)
            .await
            .map_err(HttpAppError::from)?;
        Ok(ValidatedJson(inner))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let details = error.detailed_message();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %details, error_type = error_type, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %details, error_type = error_type, "Request refused");
        }
        LogLevel::Error => {
            tracing::error!(error = %details, error_type = error_type, "Request failed");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

/// Render the body for an error. Sensitive errors carry an `error` field with
/// the detailed message, replaced by a generic string in production.
pub fn error_body(app_error: &AppError, is_production: bool) -> ApiMessage {
    let error = if !app_error.is_sensitive() {
        None
    } else if is_production {
        Some(GENERIC_ERROR_DETAIL.to_string())
    } else {
        Some(app_error.detailed_message())
    };
    ApiMessage::failure(app_error.client_message(), error)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        (status, Json(error_body(app_error, is_production_env()))).into_response()
    }
}
