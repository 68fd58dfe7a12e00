//! Inbound adapters translating external requests into domain calls.
//!
//! [`api::StudentsApi`] holds the transport-neutral behaviour; [`http`] and
//! [`function`] are thin shells around it.

pub mod api;
pub mod dto;
pub mod envelope;
pub mod function;
pub mod http;
