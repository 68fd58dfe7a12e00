//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL record store via Diesel.
//! - **memory**: in-process store for tests and local demos (`test-support`).

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod persistence;
