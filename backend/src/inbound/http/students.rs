//! Student CRUD handlers.

use actix_web::{HttpResponse, delete, get, post, put, web};

use super::{ApiState, into_response};
use crate::inbound::dto::StudentPayload;
use crate::inbound::envelope::Envelope;

/// List every student in store order.
#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "Students retrieved successfully", body = Envelope),
        (status = 500, description = "Error retrieving students", body = Envelope)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(api: ApiState) -> HttpResponse {
    into_response(api.list().await)
}

/// Fetch one student.
#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student retrieved successfully", body = Envelope),
        (status = 404, description = "Student not found", body = Envelope),
        (status = 500, description = "Error retrieving student", body = Envelope)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{id}")]
pub async fn get_student(api: ApiState, id: web::Path<String>) -> HttpResponse {
    into_response(api.get(&id).await)
}

/// Create a student. The body is read raw so falsy fields can be filtered.
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = StudentPayload,
    responses(
        (status = 201, description = "Student created successfully", body = Envelope),
        (status = 400, description = "Missing fields, malformed values, or duplicate email", body = Envelope),
        (status = 500, description = "Error creating student", body = Envelope)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/students")]
pub async fn create_student(api: ApiState, body: web::Bytes) -> HttpResponse {
    into_response(api.create(&body).await)
}

/// Partially update a student; empty, zero, and null fields are ignored.
#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    request_body = StudentPayload,
    responses(
        (status = 200, description = "Student updated successfully", body = Envelope),
        (status = 400, description = "Malformed values or duplicate email", body = Envelope),
        (status = 404, description = "Student not found", body = Envelope),
        (status = 500, description = "Error updating student", body = Envelope)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/students/{id}")]
pub async fn update_student(
    api: ApiState,
    id: web::Path<String>,
    body: web::Bytes,
) -> HttpResponse {
    into_response(api.update(&id, &body).await)
}

/// Delete a student and return its last state.
#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = String, Path, description = "Student identifier")),
    responses(
        (status = 200, description = "Student deleted successfully", body = Envelope),
        (status = 404, description = "Student not found", body = Envelope),
        (status = 500, description = "Error deleting student", body = Envelope)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(api: ApiState, id: web::Path<String>) -> HttpResponse {
    into_response(api.delete(&id).await)
}

#[cfg(test)]
mod tests;
