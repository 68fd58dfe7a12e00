//! Serverless function adapter.
//!
//! Translates a function invocation event into [`StudentsApi`] calls. Routes
//! live under [`FUNCTION_PREFIX`]: the bare prefix lists or creates, and
//! `{prefix}/{id}` reads, updates, or deletes.
//!
//! ```text
//! {"httpMethod":"GET","path":"/.netlify/functions/students/3fa8…","body":null}
//! ```

use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::api::StudentsApi;
use super::envelope::ApiReply;
use crate::middleware::cors::CORS_HEADERS;

/// Path prefix the function is deployed under.
pub const FUNCTION_PREFIX: &str = "/.netlify/functions/students";

/// Incoming invocation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    /// HTTP verb, case-insensitive.
    pub http_method: String,
    /// Full request path including [`FUNCTION_PREFIX`].
    pub path: String,
    /// Raw request body.
    #[serde(default)]
    pub body: Option<String>,
}

/// Outgoing result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    /// CORS headers plus `Content-Type` when a body is present.
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl FunctionResponse {
    fn with_cors(status: StatusCode, body: String) -> Self {
        let mut headers: BTreeMap<String, String> = CORS_HEADERS
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        if !body.is_empty() {
            headers.insert("Content-Type".to_owned(), "application/json".to_owned());
        }
        Self {
            status_code: status.as_u16(),
            headers,
            body,
        }
    }

    fn from_reply(reply: &ApiReply) -> Self {
        Self::with_cors(reply.status, reply.body())
    }
}

/// Remainder of the path after the prefix, without surrounding slashes.
fn resource_id(path: &str) -> Option<&str> {
    let rest = path.strip_prefix(FUNCTION_PREFIX).unwrap_or(path);
    let rest = rest.trim_matches('/');
    (!rest.is_empty()).then_some(rest)
}

/// Function entry point holding the shared API.
#[derive(Clone)]
pub struct StudentsFunction {
    api: StudentsApi,
}

impl StudentsFunction {
    /// Wrap `api` for function invocations.
    pub fn new(api: StudentsApi) -> Self {
        Self { api }
    }

    /// Route one invocation.
    pub async fn handle(&self, event: FunctionEvent) -> FunctionResponse {
        let method = event.http_method.to_ascii_uppercase();
        let id = resource_id(&event.path);
        let body = event.body.as_deref().unwrap_or_default().as_bytes();
        debug!(method = %method, path = %event.path, "function invocation");

        if method == "OPTIONS" {
            return FunctionResponse::with_cors(StatusCode::OK, String::new());
        }
        let reply = self.api.dispatch(&method, id, body).await;
        FunctionResponse::from_reply(&reply)
    }
}
