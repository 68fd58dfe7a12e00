//! Wire types exchanged with the student records API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A student as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Server-assigned identifier.
    pub id: String,
    /// Full name.
    pub name: String,
    /// Unique email address.
    pub email: String,
    /// Age in years.
    pub age: u8,
    /// Enrolled course.
    pub course: String,
    /// Enrollment day.
    pub enrollment_date: NaiveDate,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body sent on create and update.
///
/// `enrollment_date` is omitted when `None` so the server applies its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Age in years.
    pub age: u8,
    /// Enrolled course.
    pub course: String,
    /// Optional enrollment day.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment_date: Option<NaiveDate>,
}

/// The server's uniform response shape.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Human-readable outcome.
    pub message: String,
    /// Payload on success.
    pub data: Option<T>,
    /// Error detail on internal failures.
    pub error: Option<String>,
}
