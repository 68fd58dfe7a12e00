//! Driving port for student mutations.

use async_trait::async_trait;

use crate::domain::{
    Age, Course, EmailAddress, EnrollmentDate, Error, Student, StudentChanges, StudentId,
    StudentName,
};

/// Validated payload for creating a student.
///
/// `enrollment_date` falls back to the creation date when `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateStudentRequest {
    pub name: StudentName,
    pub email: EmailAddress,
    pub age: Age,
    pub course: Course,
    pub enrollment_date: Option<EnrollmentDate>,
}

/// Domain use-case port for creating, updating, and deleting students.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsCommand: Send + Sync {
    /// Persist a new student and return the stored record.
    async fn create_student(&self, request: CreateStudentRequest) -> Result<Student, Error>;

    /// Apply a partial update and return the stored record.
    async fn update_student(
        &self,
        id: &StudentId,
        changes: StudentChanges,
    ) -> Result<Student, Error>;

    /// Delete a student and return its last known state.
    async fn delete_student(&self, id: &StudentId) -> Result<Student, Error>;
}
