//! Domain primitives, services, and ports.
//!
//! Purpose: define strongly typed student records and the use-cases that act
//! on them. Adapters depend on this module; it depends on no adapter.
//!
//! Public surface:
//! - [`Student`] and its validated field types.
//! - [`StudentService`] implementing the driving ports in [`ports`].
//! - [`Error`] / [`ErrorCode`] for transport-agnostic failures.

pub mod error;
pub mod ports;
pub mod student;
mod student_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::student::{
    AGE_MAX, AGE_MIN, Age, Course, EmailAddress, EnrollmentDate, NewStudent, Student,
    StudentChanges, StudentId, StudentName, StudentValidationError,
};
pub use self::student_service::{EMAIL_ALREADY_EXISTS, STUDENT_NOT_FOUND, StudentService};
