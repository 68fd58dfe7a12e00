//! Driving port for read-only student queries.
//!
//! Inbound adapters use this port to fetch records without importing outbound
//! persistence concerns.

use async_trait::async_trait;

use crate::domain::{Error, Student, StudentId};

/// Domain use-case port for reading students.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentsQuery: Send + Sync {
    /// Return all students in store order.
    async fn list_students(&self) -> Result<Vec<Student>, Error>;

    /// Return one student or a not-found error.
    async fn get_student(&self, id: &StudentId) -> Result<Student, Error>;
}
