//! PostgreSQL persistence for student records.
//!
//! Diesel row types and the table definition stay private to this module; the
//! domain only sees [`DieselStudentRepository`] through its port.
//!
//! ```ignore
//! use student_records::outbound::persistence::{DbPool, DieselStudentRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new(database_url)).await?;
//! let repository = DieselStudentRepository::new(pool);
//! ```

mod diesel_student_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_student_repository::DieselStudentRepository;
pub use migrations::{MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
