//! Port abstraction for the student record store and its errors.

use async_trait::async_trait;

use crate::domain::{NewStudent, Student, StudentId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by student repository adapters.
    pub enum StudentPersistenceError {
        /// Repository connection could not be established.
        Connection { message } => "student repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message } => "student repository query failed: {message}",
        /// The store rejected a write because the email is already taken.
        DuplicateEmail { email } => "duplicate key on email: {email}",
    }
}

/// Record store holding student documents.
///
/// Each call is atomic for the single record it touches. The store owns the
/// identifier and timestamps: `insert` assigns `id`, `created_at`, and
/// `updated_at`; `update` refreshes `updated_at`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Return every stored student in the store's natural order.
    async fn list(&self) -> Result<Vec<Student>, StudentPersistenceError>;

    /// Fetch a student by identifier.
    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentPersistenceError>;

    /// Insert a new record, enforcing email uniqueness.
    async fn insert(&self, student: &NewStudent) -> Result<Student, StudentPersistenceError>;

    /// Overwrite the business fields of an existing record.
    ///
    /// Returns `None` when no record with `student.id` exists.
    async fn update(&self, student: &Student) -> Result<Option<Student>, StudentPersistenceError>;

    /// Remove a record and return its last known state.
    async fn delete(&self, id: &StudentId) -> Result<Option<Student>, StudentPersistenceError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn duplicate_email_message_names_the_address() {
        let err = StudentPersistenceError::duplicate_email("ada@example.com");
        assert_eq!(err.to_string(), "duplicate key on email: ada@example.com");
    }

    #[rstest]
    fn connection_errors_keep_their_message() {
        let err = StudentPersistenceError::connection("timed out");
        assert!(matches!(err, StudentPersistenceError::Connection { .. }));
        assert!(err.to_string().contains("timed out"));
    }
}
