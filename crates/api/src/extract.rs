//! Request-body extractors for the relocation surface.
//!
//! The legacy clients submit either JSON or an urlencoded form; the
//! negotiated [`ResponseMode`] decides whether the operation answers
//! with a JSON outcome envelope or a flash-and-redirect.

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use serde_json::Value;
use stockmove_core::error::CoreError;
use stockmove_core::relocation::RelocationInput;
use stockmove_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// How the client wants the operation outcome delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    /// JSON body with `result` and grouped messages.
    Json,
    /// Flash messages queued for the user, then a redirect to the list.
    Interactive,
}

fn response_mode(req: &Request) -> ResponseMode {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if content_type.starts_with("application/json") {
        ResponseMode::Json
    } else {
        ResponseMode::Interactive
    }
}

async fn body_bytes(req: Request) -> Result<axum::body::Bytes, AppError> {
    let body = req.into_body();
    axum::body::to_bytes(body, 1024 * 1024)
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {e}")))
}

// ---------------------------------------------------------------------------
// Save payload
// ---------------------------------------------------------------------------

/// Body of the save operation, accepted as JSON or urlencoded form.
#[derive(Debug)]
pub struct SavePayload {
    pub input: RelocationInput,
    pub mode: ResponseMode,
}

impl FromRequest<AppState> for SavePayload {
    type Rejection = AppError;

    async fn from_request(req: Request, _state: &AppState) -> Result<Self, Self::Rejection> {
        let mode = response_mode(&req);
        let bytes = body_bytes(req).await?;

        let input = match mode {
            ResponseMode::Json => {
                let value: Value = serde_json::from_slice(&bytes)
                    .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?;
                input_from_json(value)?
            }
            ResponseMode::Interactive => {
                let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(&bytes)
                    .map_err(|e| AppError::BadRequest(format!("Invalid form body: {e}")))?;
                RelocationInput::from_pairs(pairs).map_err(AppError::Core)?
            }
        };

        Ok(Self { input, mode })
    }
}

/// Accept both JSON shapes the clients send: a plain object of fields,
/// or the serialized-form shape `[{"name": ..., "value": ...}, ...]`.
fn input_from_json(value: Value) -> Result<RelocationInput, AppError> {
    let pairs: Vec<(String, String)> = match value {
        Value::Array(items) => {
            let mut pairs = Vec::with_capacity(items.len());
            for item in items {
                let name = item
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        AppError::BadRequest(
                            "Array elements must be {name, value} objects".into(),
                        )
                    })?
                    .to_string();
                let raw = item.get("value").cloned().unwrap_or(Value::Null);
                pairs.push((name, scalar_to_string(&raw)?));
            }
            pairs
        }
        Value::Object(map) => {
            let mut pairs = Vec::with_capacity(map.len());
            for (name, raw) in map {
                pairs.push((name, scalar_to_string(&raw)?));
            }
            pairs
        }
        _ => {
            return Err(AppError::BadRequest(
                "Expected a JSON object or an array of {name, value} pairs".into(),
            ))
        }
    };

    RelocationInput::from_pairs(pairs).map_err(AppError::Core)
}

fn scalar_to_string(value: &Value) -> Result<String, AppError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        _ => Err(AppError::BadRequest(
            "Field values must be scalars".into(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Batch payload
// ---------------------------------------------------------------------------

/// Body of the batch confirm/delete operations.
///
/// JSON clients send `{"relocations": [1, 2, 3]}` (string ids are also
/// accepted); form clients repeat the `relocation` key once per id.
#[derive(Debug)]
pub struct BatchPayload {
    pub ids: Vec<DbId>,
    pub mode: ResponseMode,
}

impl FromRequest<AppState> for BatchPayload {
    type Rejection = AppError;

    async fn from_request(req: Request, _state: &AppState) -> Result<Self, Self::Rejection> {
        let mode = response_mode(&req);
        let bytes = body_bytes(req).await?;

        let ids = match mode {
            ResponseMode::Json => {
                let value: Value = serde_json::from_slice(&bytes)
                    .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {e}")))?;
                let items = value
                    .get("relocations")
                    .and_then(Value::as_array)
                    .ok_or_else(|| {
                        AppError::BadRequest("Expected a 'relocations' array of ids".into())
                    })?;
                let mut ids = Vec::with_capacity(items.len());
                for item in items {
                    ids.push(id_from_json(item)?);
                }
                ids
            }
            ResponseMode::Interactive => {
                let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(&bytes)
                    .map_err(|e| AppError::BadRequest(format!("Invalid form body: {e}")))?;
                let mut ids = Vec::new();
                for (name, value) in pairs {
                    if name == "relocation" {
                        ids.push(parse_id(&value)?);
                    }
                }
                ids
            }
        };

        Ok(Self { ids, mode })
    }
}

fn id_from_json(value: &Value) -> Result<DbId, AppError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| {
            AppError::BadRequest(format!("Invalid relocation id '{n}'"))
        }),
        Value::String(s) => parse_id(s),
        other => Err(AppError::BadRequest(format!(
            "Invalid relocation id '{other}'"
        ))),
    }
}

fn parse_id(raw: &str) -> Result<DbId, AppError> {
    raw.trim().parse().map_err(|_| {
        AppError::Core(CoreError::Validation(format!(
            "Invalid relocation id '{raw}'"
        )))
    })
}
