//! Client-side state manager for the student records API.
//!
//! [`StudentBook`] holds the list a user sees and drives create, update,
//! and delete through a [`StudentsApi`] port. [`HttpStudentsApi`] is the
//! reqwest-backed implementation configured by [`ClientConfig`].

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod model;
pub mod state;

pub use api::{HttpStudentsApi, StudentsApi};
pub use config::{API_TIMEOUT_ENV, API_URL_ENV, ClientConfig};
pub use error::ClientError;
pub use form::{FormErrors, FormField, StudentForm};
pub use model::{Envelope, Student, StudentPayload};
pub use state::{Confirm, DELETE_PROMPT, FETCH_FAILED, Notifier, StudentBook};
