//! Liveness probe.

use actix_web::{HttpResponse, get, http::header};

use super::{ApiState, into_response};
use crate::inbound::envelope::Envelope;

/// Report that the process is serving requests. Never touches the store.
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Server is running", body = Envelope)),
    tags = ["health"],
    operation_id = "health"
)]
#[get("/health")]
pub async fn health(api: ApiState) -> HttpResponse {
    let mut response = into_response(api.health());
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}
