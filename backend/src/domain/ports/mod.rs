//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (the record store) expose strongly typed errors so adapters map
//! their failures into predictable variants. Driving ports (queries and
//! commands) speak the domain [`Error`](crate::domain::Error) type.

mod macros;
pub(crate) use macros::define_port_error;

mod student_repository;
mod students_command;
mod students_query;

#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{StudentPersistenceError, StudentRepository};
#[cfg(test)]
pub use students_command::MockStudentsCommand;
pub use students_command::{CreateStudentRequest, StudentsCommand};
#[cfg(test)]
pub use students_query::MockStudentsQuery;
pub use students_query::StudentsQuery;
