//! PostgreSQL-backed `StudentRepository` using Diesel.
//!
//! Uniqueness of `email` is enforced by the table's unique index; a violation
//! is reported as [`StudentPersistenceError::DuplicateEmail`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};

use crate::domain::ports::{StudentPersistenceError, StudentRepository};
use crate::domain::{
    Age, Course, EmailAddress, EnrollmentDate, NewStudent, Student, StudentId, StudentName,
};

use super::models::{NewStudentRow, StudentChangeset, StudentRow};
use super::pool::{DbPool, PoolError};
use super::schema::students;

/// Diesel implementation of the student record store.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a repository drawing connections from `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> StudentPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StudentPersistenceError::connection(message)
        }
    }
}

/// Map Diesel failures onto port errors without leaking SQL text.
///
/// `email` names the address being written, when there is one, so a unique
/// violation can report it.
fn map_diesel_error(error: diesel::result::Error, email: Option<&str>) -> StudentPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => StudentPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => StudentPersistenceError::query("database query error"),
        DieselError::DatabaseError(kind, _) => match kind {
            DatabaseErrorKind::UniqueViolation => {
                StudentPersistenceError::duplicate_email(email.unwrap_or_default())
            }
            DatabaseErrorKind::ClosedConnection => {
                StudentPersistenceError::connection("database connection error")
            }
            _ => StudentPersistenceError::query("database error"),
        },
        _ => StudentPersistenceError::query("database error"),
    }
}

/// Convert a stored row into a domain record.
///
/// Table constraints make a failure here unlikely; one still surfaces as a
/// query error rather than a panic.
fn row_to_student(row: StudentRow) -> Result<Student, StudentPersistenceError> {
    let invalid = |err: crate::domain::StudentValidationError| {
        warn!(student_id = %row.id, error = %err, "stored student row failed validation");
        StudentPersistenceError::query("stored record is invalid")
    };

    Ok(Student {
        id: StudentId::from_uuid(row.id),
        name: StudentName::new(row.name.clone()).map_err(invalid)?,
        email: EmailAddress::new(row.email.clone()).map_err(invalid)?,
        age: Age::new(i64::from(row.age)).map_err(invalid)?,
        course: Course::new(row.course.clone()).map_err(invalid)?,
        enrollment_date: EnrollmentDate::from_date(row.enrollment_date),
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn age_column(age: Age) -> i16 {
    i16::from(age.years())
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<StudentRow> = students::table
            .order((students::created_at.asc(), students::id.asc()))
            .select(StudentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        rows.into_iter().map(row_to_student).collect()
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StudentRow> = students::table
            .find(id.as_uuid())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_student).transpose()
    }

    async fn insert(&self, student: &NewStudent) -> Result<Student, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewStudentRow {
            name: student.name.as_ref(),
            email: student.email.as_ref(),
            age: age_column(student.age),
            course: student.course.as_ref(),
            enrollment_date: student.enrollment_date.as_date(),
        };

        let row: StudentRow = diesel::insert_into(students::table)
            .values(&new_row)
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(student.email.as_ref())))?;

        row_to_student(row)
    }

    async fn update(&self, student: &Student) -> Result<Option<Student>, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changeset = StudentChangeset {
            name: student.name.as_ref(),
            email: student.email.as_ref(),
            age: age_column(student.age),
            course: student.course.as_ref(),
            enrollment_date: student.enrollment_date.as_date(),
        };

        let row: Option<StudentRow> = diesel::update(students::table.find(student.id.as_uuid()))
            .set((&changeset, students::updated_at.eq(diesel::dsl::now)))
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, Some(student.email.as_ref())))?;

        row.map(row_to_student).transpose()
    }

    async fn delete(&self, id: &StudentId) -> Result<Option<Student>, StudentPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<StudentRow> = diesel::delete(students::table.find(id.as_uuid()))
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_student).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Error mapping coverage; queries are exercised against a live database
    //! outside the unit suite.

    use super::*;
    use chrono::{NaiveDate, Utc};
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;
    use uuid::Uuid;

    fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_owned()))
    }

    #[rstest]
    fn unique_violation_reports_the_email_being_written() {
        let err = map_diesel_error(
            database_error(
                DatabaseErrorKind::UniqueViolation,
                "duplicate key value violates unique constraint \"students_email_key\"",
            ),
            Some("ada@example.com"),
        );
        assert_eq!(
            err,
            StudentPersistenceError::duplicate_email("ada@example.com")
        );
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let err = map_diesel_error(
            database_error(DatabaseErrorKind::ClosedConnection, "server closed"),
            None,
        );
        assert!(matches!(err, StudentPersistenceError::Connection { .. }));
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::CheckViolation, "students_age_check"))]
    #[case(DieselError::NotFound)]
    #[case(DieselError::RollbackTransaction)]
    fn other_failures_hide_database_text(#[case] error: DieselError) {
        let err = map_diesel_error(error, None);
        assert!(matches!(err, StudentPersistenceError::Query { .. }));
        assert!(!err.to_string().contains("students_age_check"));
    }

    #[rstest]
    fn pool_errors_map_to_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, StudentPersistenceError::connection("timed out"));
    }

    fn row(email: &str, age: i16) -> StudentRow {
        StudentRow {
            id: Uuid::new_v4(),
            name: "Ada Lovelace".to_owned(),
            email: email.to_owned(),
            age,
            course: "Math".to_owned(),
            enrollment_date: NaiveDate::from_ymd_opt(2024, 9, 1).expect("valid date"),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[rstest]
    fn rows_convert_into_domain_records() {
        let source = row("ada@example.com", 30);
        let student = row_to_student(source.clone()).expect("valid row");
        assert_eq!(student.id.as_uuid(), &source.id);
        assert_eq!(student.age.years(), 30);
        assert_eq!(student.enrollment_date.to_string(), "2024-09-01");
    }

    #[rstest]
    #[case("not-an-email", 30)]
    #[case("ada@example.com", 0)]
    fn corrupt_rows_surface_as_query_errors(#[case] email: &str, #[case] age: i16) {
        let err = row_to_student(row(email, age)).expect_err("invalid row");
        assert!(matches!(err, StudentPersistenceError::Query { .. }));
    }
}
