use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub const DEFAULT_SESSION_ID: &str = "default_session";
pub const DEFAULT_TEXT: &str = "Hello";

#[derive(Debug, Default, PartialEq)]
pub struct SessionRequest {
    pub session_id: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FulfillmentResponse {
    #[serde(rename = "fulfillmentText")]
    pub fulfillment_text: String,
}

/// Request failures, one per point where the session flow can stop. Each
/// renders as a single-key JSON object naming that point.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    ClientSetup(String),

    #[error("{0}")]
    Detection(String),

    #[error("{0}")]
    Completion(String),
}

impl SessionRequest {
    /// Parses a request body. The body must be a JSON object; the last of
    /// duplicate keys wins, and keys match case-insensitively with an exact
    /// match taking precedence.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        let fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(ApiError::InvalidRequest(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )));
            }
        };

        Ok(Self {
            session_id: string_field(&fields, "session_id")?,
            text: string_field(&fields, "text")?,
        })
    }

    pub fn session_id(&self) -> &str {
        non_empty_or(self.session_id.as_deref(), DEFAULT_SESSION_ID)
    }

    pub fn text(&self) -> &str {
        non_empty_or(self.text.as_deref(), DEFAULT_TEXT)
    }
}

fn string_field(fields: &Map<String, Value>, name: &str) -> Result<Option<String>, ApiError> {
    let value = fields.get(name).or_else(|| {
        fields
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    });

    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(ApiError::InvalidRequest(format!(
            "invalid type for field `{}`: expected a string, got {}",
            name,
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn non_empty_or<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ClientSetup(_) | Self::Detection(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Completion(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "error1",
            Self::ClientSetup(_) => "error2",
            Self::Detection(_) => "error3",
            Self::Completion(_) => "error4",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = Map::new();
        body.insert(self.key().to_string(), Value::String(self.to_string()));
        (self.status(), Json(Value::Object(body))).into_response()
    }
}
