//! Response envelope shared by every transport.
//!
//! ```text
//! {"success":true,"message":"Student retrieved successfully","data":{...}}
//! {"success":false,"message":"Error creating student","error":"..."}
//! ```

use actix_web::http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

/// Uniform response body. `data` and `error` are omitted when absent.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    /// Successful envelope carrying `data`.
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    /// Successful envelope without a payload.
    pub fn acknowledged(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
        }
    }

    /// Failure envelope; `error` is only set for internal failures.
    pub fn failure(err: &Error) -> Self {
        Self {
            success: false,
            message: err.message().to_owned(),
            data: None,
            error: match err.code() {
                ErrorCode::InternalError => err.cause().map(str::to_owned),
                _ => None,
            },
        }
    }
}

/// Transport status for a domain error code.
///
/// Email conflicts are client errors and answer 400 rather than 409.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Status plus envelope, ready for any transport to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: StatusCode,
    pub envelope: Envelope,
}

impl ApiReply {
    /// Reply with an explicit status.
    pub fn new(status: StatusCode, envelope: Envelope) -> Self {
        Self { status, envelope }
    }

    /// Reply describing a domain failure.
    pub fn from_error(err: &Error) -> Self {
        Self::new(status_for(err.code()), Envelope::failure(err))
    }

    /// Serialize the envelope to its JSON body.
    pub fn body(&self) -> String {
        serde_json::to_string(&self.envelope).unwrap_or_else(|err| {
            error!(error = %err, "failed to serialize response envelope");
            r#"{"success":false,"message":"Internal server error"}"#.to_owned()
        })
    }
}

impl From<Error> for ApiReply {
    fn from(err: Error) -> Self {
        Self::from_error(&err)
    }
}
