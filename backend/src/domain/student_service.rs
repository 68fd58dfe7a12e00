//! Student domain service implementing the query and command driving ports.
//!
//! The service owns the record lifecycle rules: enrollment dates default to
//! the creation day, partial updates only touch supplied fields, and store
//! failures become domain errors carrying an operation-specific message.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{
    CreateStudentRequest, StudentPersistenceError, StudentRepository, StudentsCommand,
    StudentsQuery,
};
use crate::domain::{EnrollmentDate, Error, NewStudent, Student, StudentChanges, StudentId};

/// Message returned when an identifier matches no record.
pub const STUDENT_NOT_FOUND: &str = "Student not found";
/// Message returned when the store reports a duplicate email.
pub const EMAIL_ALREADY_EXISTS: &str = "Email already exists";

/// Operation currently being served; selects the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Error retrieving students",
            Self::Get => "Error retrieving student",
            Self::Create => "Error creating student",
            Self::Update => "Error updating student",
            Self::Delete => "Error deleting student",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

fn map_persistence_error(error: StudentPersistenceError, operation: Operation) -> Error {
    match error {
        StudentPersistenceError::DuplicateEmail { email } => {
            debug!(operation = operation.as_str(), %email, "email uniqueness conflict");
            Error::conflict(EMAIL_ALREADY_EXISTS)
        }
        other => {
            error!(operation = operation.as_str(), error = %other, "student store failure");
            Error::internal(operation.failure_message()).with_cause(other.to_string())
        }
    }
}

/// Student service backed by a [`StudentRepository`].
#[derive(Clone)]
pub struct StudentService<R> {
    repository: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> StudentService<R> {
    /// Create a service over a repository and a clock used for default dates.
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use student_records::domain::StudentService;
    /// # fn wire<R>(repository: Arc<R>) -> StudentService<R> {
    /// StudentService::new(repository, Arc::new(DefaultClock))
    /// # }
    /// ```
    pub fn new(repository: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    fn today(&self) -> EnrollmentDate {
        EnrollmentDate::from_date(self.clock.utc().date_naive())
    }
}

#[async_trait]
impl<R> StudentsQuery for StudentService<R>
where
    R: StudentRepository,
{
    async fn list_students(&self) -> Result<Vec<Student>, Error> {
        self.repository
            .list()
            .await
            .map_err(|err| map_persistence_error(err, Operation::List))
    }

    async fn get_student(&self, id: &StudentId) -> Result<Student, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|err| map_persistence_error(err, Operation::Get))?
            .ok_or_else(|| Error::not_found(STUDENT_NOT_FOUND))
    }
}

#[async_trait]
impl<R> StudentsCommand for StudentService<R>
where
    R: StudentRepository,
{
    async fn create_student(&self, request: CreateStudentRequest) -> Result<Student, Error> {
        let CreateStudentRequest {
            name,
            email,
            age,
            course,
            enrollment_date,
        } = request;
        let new_student = NewStudent {
            name,
            email,
            age,
            course,
            enrollment_date: enrollment_date.unwrap_or_else(|| self.today()),
        };
        self.repository
            .insert(&new_student)
            .await
            .map_err(|err| map_persistence_error(err, Operation::Create))
    }

    async fn update_student(
        &self,
        id: &StudentId,
        changes: StudentChanges,
    ) -> Result<Student, Error> {
        let mut student = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|err| map_persistence_error(err, Operation::Update))?
            .ok_or_else(|| Error::not_found(STUDENT_NOT_FOUND))?;

        if !changes.apply_to(&mut student) {
            debug!(student_id = %id, "update carried no changes; skipping write");
            return Ok(student);
        }

        self.repository
            .update(&student)
            .await
            .map_err(|err| map_persistence_error(err, Operation::Update))?
            .ok_or_else(|| Error::not_found(STUDENT_NOT_FOUND))
    }

    async fn delete_student(&self, id: &StudentId) -> Result<Student, Error> {
        self.repository
            .delete(id)
            .await
            .map_err(|err| map_persistence_error(err, Operation::Delete))?
            .ok_or_else(|| Error::not_found(STUDENT_NOT_FOUND))
    }
}
