use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use stockmove_core::error::CoreError;
use stockmove_engine::EngineFailure;

/// API-level error type wrapping core errors and infrastructure failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<EngineFailure> for AppError {
    fn from(failure: EngineFailure) -> Self {
        match failure {
            EngineFailure::Db(e) => AppError::Database(e),
            // Business rejections are normally surfaced as advisories by
            // the handlers; one reaching here is a programming error.
            EngineFailure::Rejected(e) => AppError::InternalError(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },
            AppError::Database(e) => return classify_sqlx_error(e),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message, "code": code }));
        (status, body).into_response()
    }
}

/// Map sqlx errors onto HTTP responses without leaking SQL details.
fn classify_sqlx_error(e: &sqlx::Error) -> Response {
    match e {
        sqlx::Error::RowNotFound => {
            let body = Json(json!({ "error": "Resource not found", "code": "NOT_FOUND" }));
            (StatusCode::NOT_FOUND, body).into_response()
        }
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
            let body = Json(json!({ "error": "Resource already exists", "code": "CONFLICT" }));
            (StatusCode::CONFLICT, body).into_response()
        }
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23503") => {
            let body = Json(json!({
                "error": "Referenced resource does not exist",
                "code": "VALIDATION_ERROR"
            }));
            (StatusCode::BAD_REQUEST, body).into_response()
        }
        other => {
            tracing::error!(error = %other, "database error");
            let body = Json(json!({ "error": "A database error occurred", "code": "DATABASE_ERROR" }));
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}
