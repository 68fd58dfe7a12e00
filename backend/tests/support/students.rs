//! Shared wiring for student integration tests.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use serde_json::{Value, json};
use student_records::domain::StudentService;
use student_records::inbound::api::StudentsApi;
use student_records::outbound::memory::InMemoryStudentRepository;

/// API over a fresh in-memory store, plus a handle to inspect that store.
pub fn in_memory_api() -> (StudentsApi, InMemoryStudentRepository) {
    let repository = InMemoryStudentRepository::default();
    let service = StudentService::new(Arc::new(repository.clone()), Arc::new(DefaultClock));
    (StudentsApi::from_service(Arc::new(service)), repository)
}

/// Same as [`in_memory_api`] but wrapped for actix app data.
pub fn in_memory_data() -> (web::Data<StudentsApi>, InMemoryStudentRepository) {
    let (api, repository) = in_memory_api();
    (web::Data::new(api), repository)
}

/// The canonical create payload.
pub fn ada() -> Value {
    json!({
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "age": 30,
        "course": "Math"
    })
}
