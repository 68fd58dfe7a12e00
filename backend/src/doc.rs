//! OpenAPI document for the student REST API.
//!
//! Served by Swagger UI at `/docs` in debug builds and printed by the
//! `openapi-dump` binary. Paths are documented under the default `/api`
//! prefix.

use utoipa::OpenApi;

use crate::domain::Student;
use crate::inbound::dto::StudentPayload;
use crate::inbound::envelope::Envelope;

/// OpenAPI description of every endpoint.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Student records API",
        description = "CRUD over student records with a uniform success/message envelope."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::get_student,
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::update_student,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::health::health,
    ),
    components(schemas(Student, StudentPayload, Envelope)),
    tags(
        (name = "students", description = "Student record management"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
