//! Session state for the student records screen.
//!
//! [`StudentBook`] owns the student list and form state. Every mutating
//! operation takes `&mut self`, so a session never has two requests in
//! flight at once.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::StudentsApi;
use crate::error::ClientError;
use crate::form::StudentForm;
use crate::model::Student;

/// Text shown when the list cannot be fetched, whatever the cause.
pub const FETCH_FAILED: &str = "Failed to fetch students. Make sure the backend is running.";
/// Prompt shown before deleting a student.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this student?";

/// Asks the user a yes/no question.
#[cfg_attr(test, mockall::automock)]
pub trait Confirm: Send + Sync {
    /// Return `true` when the user accepts `prompt`.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Shows a transient message to the user.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    /// Display `message`.
    fn notify(&self, message: &str);
}

/// Client-side view of the student collection.
pub struct StudentBook {
    api: Arc<dyn StudentsApi>,
    confirm: Arc<dyn Confirm>,
    notifier: Arc<dyn Notifier>,
    students: Vec<Student>,
    loading: bool,
    error: Option<String>,
    editing_student: Option<Student>,
    form_open: bool,
}

impl StudentBook {
    /// Create an empty book backed by the given seams.
    pub fn new(
        api: Arc<dyn StudentsApi>,
        confirm: Arc<dyn Confirm>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            confirm,
            notifier,
            students: Vec::new(),
            loading: false,
            error: None,
            editing_student: None,
            form_open: false,
        }
    }

    /// Load the list for the first time.
    pub async fn initialize(&mut self) {
        self.refresh().await;
    }

    /// Reload the list, discarding any edit in progress.
    pub async fn refresh(&mut self) {
        self.editing_student = None;
        self.form_open = false;
        self.loading = true;
        self.error = None;
        match self.api.list().await {
            Ok(students) => {
                debug!(count = students.len(), "student list loaded");
                self.students = students;
            }
            Err(err) => {
                warn!(error = %err, "failed to load student list");
                self.error = Some(FETCH_FAILED.to_owned());
            }
        }
        self.loading = false;
    }

    /// Submit a new student.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidForm`] without contacting the server when
    /// the form fails validation, or the request failure after notifying the
    /// user.
    pub async fn create(&mut self, form: &StudentForm) -> Result<Student, ClientError> {
        let payload = form.to_payload().map_err(ClientError::InvalidForm)?;
        match self.api.create(&payload).await {
            Ok(student) => {
                self.students.push(student.clone());
                self.form_open = false;
                Ok(student)
            }
            Err(err) => Err(self.report("Error adding student", err)),
        }
    }

    /// Submit changes for the student being edited.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotEditing`] when no edit is in progress,
    /// [`ClientError::InvalidForm`] when validation fails, or the request
    /// failure after notifying the user.
    pub async fn update(&mut self, form: &StudentForm) -> Result<Student, ClientError> {
        let id = self
            .editing_student
            .as_ref()
            .map(|student| student.id.clone())
            .ok_or(ClientError::NotEditing)?;
        let payload = form.to_payload().map_err(ClientError::InvalidForm)?;
        match self.api.update(&id, &payload).await {
            Ok(student) => {
                if let Some(slot) = self.students.iter_mut().find(|s| s.id == student.id) {
                    *slot = student.clone();
                }
                self.editing_student = None;
                self.form_open = false;
                Ok(student)
            }
            Err(err) => Err(self.report("Error updating student", err)),
        }
    }

    /// Delete a student after the user confirms.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Cancelled`] when the user declines, or the
    /// request failure after notifying the user.
    pub async fn delete(&mut self, id: &str) -> Result<Student, ClientError> {
        if !self.confirm.confirm(DELETE_PROMPT) {
            return Err(ClientError::Cancelled);
        }
        match self.api.delete(id).await {
            Ok(student) => {
                self.students.retain(|s| s.id != id);
                Ok(student)
            }
            Err(err) => Err(self.report("Error deleting student", err)),
        }
    }

    /// Open the form prefilled with `student`.
    pub fn begin_edit(&mut self, student: Student) -> StudentForm {
        let form = StudentForm::from_student(&student);
        self.editing_student = Some(student);
        self.form_open = true;
        form
    }

    /// Open an empty form for a new student.
    pub fn open_form(&mut self) {
        self.editing_student = None;
        self.form_open = true;
    }

    /// Close the form and abandon any edit.
    pub fn close_form(&mut self) {
        self.editing_student = None;
        self.form_open = false;
    }

    /// Students in server order.
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Whether a list request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The current fetch error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The student being edited, if any.
    pub fn editing_student(&self) -> Option<&Student> {
        self.editing_student.as_ref()
    }

    /// Whether the form is visible.
    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    fn report(&self, action: &str, err: ClientError) -> ClientError {
        self.notifier.notify(&format!("{action}: {err}"));
        err
    }
}
