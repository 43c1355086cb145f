//! JSON response writer.
//!
//! Handlers hand over a payload in one of three shapes, all captured by
//! [`Reply`]:
//!
//! | Shape | Built with | Status |
//! |---|---|---|
//! | bare payload | [`Reply::raw`] | `200` |
//! | payload + code | [`Reply::with_code`] | the given code |
//! | wrapper | [`respond_with_code`] | the wrapped code |
//!
//! [`write_json`] resolves the shape into exactly one [`Response`] with
//! `content-type: application/json`. Structured payloads (objects, arrays,
//! `null`) are pretty-printed with a two-space indent. Strings, numbers and
//! booleans are written as their bare text.
//!
//! A payload is "present" when it is `Some`, whatever its value. `false`, `0`
//! and `""` are all written; only `None` means "no payload". On the wire an
//! empty string and no payload look the same: `200`, `application/json`, and
//! an empty body. The difference exists only in the [`Reply`] value.
//!
//! ```rust
//! use trustproofs::{respond_with_code, write_json, Reply};
//! use serde_json::json;
//!
//! let res = write_json(Reply::raw(json!({ "ok": true })));
//! assert_eq!(res.status_code(), 200);
//! assert_eq!(res.body(), b"{\n  \"ok\": true\n}");
//!
//! let res = write_json(respond_with_code(404, json!({ "error": "not found" })).into());
//! assert_eq!(res.status_code(), 404);
//! ```

use http::StatusCode;
use serde::Serialize;
use serde_json::Value;

use crate::response::{IntoResponse, Response};

/// A payload bundled with an explicit status code.
///
/// Constructed by a handler, consumed once by [`write_json`].
#[derive(Clone, Debug, PartialEq)]
pub struct ResponsePayload {
    pub code: u16,
    pub payload: Option<Value>,
}

/// Wraps `payload` with `code` for a handler that wants to override the
/// default `200`.
pub fn respond_with_code(code: u16, payload: impl Serialize) -> ResponsePayload {
    match to_payload(payload) {
        Some(payload) => ResponsePayload { code, payload: Some(payload) },
        None => serialization_failed(),
    }
}

/// Every argument shape the writer accepts.
#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    /// Payload only. Status defaults to `200`.
    Raw(Option<Value>),
    /// Payload plus an explicit status code.
    WithCode(Option<Value>, u16),
    /// A pre-built [`ResponsePayload`].
    Wrapper(ResponsePayload),
}

impl Reply {
    pub fn raw(payload: impl Serialize) -> Self {
        match to_payload(payload) {
            Some(v) => Self::Raw(Some(v)),
            None => Self::Wrapper(serialization_failed()),
        }
    }

    pub fn with_code(payload: impl Serialize, code: u16) -> Self {
        match to_payload(payload) {
            Some(v) => Self::WithCode(Some(v), code),
            None => Self::Wrapper(serialization_failed()),
        }
    }

    /// No payload at all: `200` with an empty body.
    pub fn empty() -> Self {
        Self::Raw(None)
    }
}

impl From<ResponsePayload> for Reply {
    fn from(p: ResponsePayload) -> Self {
        Self::Wrapper(p)
    }
}

/// Resolves `reply` into a single JSON response.
///
/// Never fails. A code outside `100..=599` is logged and replaced by `200`.
pub fn write_json(reply: Reply) -> Response {
    let (payload, code) = match reply {
        Reply::Wrapper(ResponsePayload { code, payload }) => {
            return write_json(Reply::WithCode(payload, code));
        }
        Reply::WithCode(payload, code) => (payload, Some(code)),
        Reply::Raw(payload) => (payload, None),
    };

    let status = match code {
        None => StatusCode::OK,
        Some(code) => resolve_status(code),
    };

    let body = match payload {
        None => String::new(),
        Some(value) => render(value),
    };

    Response::builder().status(status).json(body)
}

fn resolve_status(code: u16) -> StatusCode {
    // `from_u16` admits up to 999; HTTP only defines 1xx-5xx.
    match StatusCode::from_u16(code) {
        Ok(status) if code <= 599 => status,
        _ => {
            tracing::warn!(code, "invalid status code passed to writer, using 200");
            StatusCode::OK
        }
    }
}

fn render(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        structured => serde_json::to_string_pretty(&structured).unwrap_or_default(),
    }
}

fn to_payload(payload: impl Serialize) -> Option<Value> {
    match serde_json::to_value(payload) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize response payload");
            None
        }
    }
}

fn serialization_failed() -> ResponsePayload {
    ResponsePayload { code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(), payload: None }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response { write_json(self) }
}

impl IntoResponse for ResponsePayload {
    fn into_response(self) -> Response { write_json(self.into()) }
}

impl IntoResponse for Value {
    fn into_response(self) -> Response { write_json(Reply::Raw(Some(self))) }
}
