//! Transport-neutral student API.
//!
//! Owns request validation, error mapping, and envelope rendering so the HTTP
//! server and the serverless function adapter answer identically.

use std::sync::Arc;

use actix_web::http::StatusCode;
use serde::Serialize;
use tracing::{debug, error};

use crate::domain::ports::{StudentsCommand, StudentsQuery};
use crate::domain::{Error, ErrorCode, STUDENT_NOT_FOUND, StudentId};

use super::dto::{parse_create, parse_update};
use super::envelope::{ApiReply, Envelope};

/// Message for a successful list.
pub const STUDENTS_RETRIEVED: &str = "Students retrieved successfully";
/// Message for a successful single fetch.
pub const STUDENT_RETRIEVED: &str = "Student retrieved successfully";
/// Message for a successful create.
pub const STUDENT_CREATED: &str = "Student created successfully";
/// Message for a successful update.
pub const STUDENT_UPDATED: &str = "Student updated successfully";
/// Message for a successful delete.
pub const STUDENT_DELETED: &str = "Student deleted successfully";
/// Message for the health probe.
pub const SERVER_RUNNING: &str = "Server is running";
/// Message for methods no student route accepts.
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";

/// Student operations rendered as [`ApiReply`] values.
#[derive(Clone)]
pub struct StudentsApi {
    query: Arc<dyn StudentsQuery>,
    command: Arc<dyn StudentsCommand>,
}

impl StudentsApi {
    /// Build the API from its driving ports.
    pub fn new(query: Arc<dyn StudentsQuery>, command: Arc<dyn StudentsCommand>) -> Self {
        Self { query, command }
    }

    /// Build the API from one service implementing both ports.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: StudentsQuery + StudentsCommand + 'static,
    {
        Self {
            query: service.clone(),
            command: service,
        }
    }

    /// `GET /students`
    pub async fn list(&self) -> ApiReply {
        match self.query.list_students().await {
            Ok(students) => ok(StatusCode::OK, STUDENTS_RETRIEVED, &students),
            Err(err) => ApiReply::from(err),
        }
    }

    /// `GET /students/{id}`
    pub async fn get(&self, raw_id: &str) -> ApiReply {
        let id = match parse_id(raw_id) {
            Ok(id) => id,
            Err(err) => return ApiReply::from(err),
        };
        match self.query.get_student(&id).await {
            Ok(student) => ok(StatusCode::OK, STUDENT_RETRIEVED, &student),
            Err(err) => ApiReply::from(err),
        }
    }

    /// `POST /students`
    pub async fn create(&self, body: &[u8]) -> ApiReply {
        let request = match parse_create(body) {
            Ok(request) => request,
            Err(err) => return rejected(err),
        };
        match self.command.create_student(request).await {
            Ok(student) => ok(StatusCode::CREATED, STUDENT_CREATED, &student),
            Err(err) => ApiReply::from(err),
        }
    }

    /// `PUT /students/{id}`
    ///
    /// The record must exist before the body is validated, so an unknown id
    /// answers 404 whatever the body holds.
    pub async fn update(&self, raw_id: &str, body: &[u8]) -> ApiReply {
        let id = match parse_id(raw_id) {
            Ok(id) => id,
            Err(err) => return ApiReply::from(err),
        };
        if let Err(err) = self.query.get_student(&id).await {
            return ApiReply::from(as_update_failure(err));
        }
        let changes = match parse_update(body) {
            Ok(changes) => changes,
            Err(err) => return rejected(err),
        };
        match self.command.update_student(&id, changes).await {
            Ok(student) => ok(StatusCode::OK, STUDENT_UPDATED, &student),
            Err(err) => ApiReply::from(err),
        }
    }

    /// `DELETE /students/{id}`
    pub async fn delete(&self, raw_id: &str) -> ApiReply {
        let id = match parse_id(raw_id) {
            Ok(id) => id,
            Err(err) => return ApiReply::from(err),
        };
        match self.command.delete_student(&id).await {
            Ok(student) => ok(StatusCode::OK, STUDENT_DELETED, &student),
            Err(err) => ApiReply::from(err),
        }
    }

    /// Route a request on the students collection by verb and optional id.
    ///
    /// Both transports fall back to this for requests their own routing did
    /// not claim, so a trailing slash lists and an unsupported verb answers
    /// 405 on either one.
    pub async fn dispatch(&self, method: &str, id: Option<&str>, body: &[u8]) -> ApiReply {
        match (method, id) {
            ("GET", None) => self.list().await,
            ("GET", Some(id)) => self.get(id).await,
            ("POST", None) => self.create(body).await,
            ("PUT", Some(id)) => self.update(id, body).await,
            ("DELETE", Some(id)) => self.delete(id).await,
            _ => {
                debug!(method, has_id = id.is_some(), "method not allowed");
                ApiReply::new(
                    StatusCode::METHOD_NOT_ALLOWED,
                    Envelope {
                        success: false,
                        message: METHOD_NOT_ALLOWED.to_owned(),
                        data: None,
                        error: None,
                    },
                )
            }
        }
    }

    /// `GET /health`; never touches the store.
    pub fn health(&self) -> ApiReply {
        ApiReply::new(StatusCode::OK, Envelope::acknowledged(SERVER_RUNNING))
    }
}

/// A malformed identifier cannot name any record.
fn parse_id(raw_id: &str) -> Result<StudentId, Error> {
    StudentId::new(raw_id).map_err(|_| {
        debug!(raw_id, "malformed student id");
        Error::not_found(STUDENT_NOT_FOUND)
    })
}

/// Lookup failures during an update report the update's own message.
fn as_update_failure(err: Error) -> Error {
    match err.code() {
        ErrorCode::InternalError => {
            let failure = Error::internal("Error updating student");
            match err.cause() {
                Some(cause) => failure.with_cause(cause),
                None => failure,
            }
        }
        _ => err,
    }
}

fn rejected(err: Error) -> ApiReply {
    debug!(message = err.message(), "request rejected by validation");
    ApiReply::from(err)
}

fn ok<T: Serialize>(status: StatusCode, message: &str, data: &T) -> ApiReply {
    match serde_json::to_value(data) {
        Ok(value) => ApiReply::new(status, Envelope::success(message, value)),
        Err(err) => {
            error!(error = %err, "failed to serialize response data");
            ApiReply::from(Error::internal("Internal server error").with_cause(err.to_string()))
        }
    }
}
