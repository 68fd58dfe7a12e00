//! Form state and local validation.
//!
//! Mirrors what the server accepts so obviously invalid submissions are
//! refused before any request is sent.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::model::{Student, StudentPayload};

const AGE_MIN: i64 = 1;
const AGE_MAX: i64 = 120;

/// Editable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    /// Full name.
    Name,
    /// Email address.
    Email,
    /// Age in years.
    Age,
    /// Enrolled course.
    Course,
    /// Enrollment day.
    EnrollmentDate,
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FormField, &'static str>);

impl FormErrors {
    /// Message for `field`, if it failed.
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn insert(&mut self, field: FormField, message: &'static str) {
        self.0.insert(field, message);
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for message in self.0.values() {
            if !first {
                f.write_str("; ")?;
            }
            f.write_str(message)?;
            first = false;
        }
        Ok(())
    }
}

/// Raw form input, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Age, still as text.
    pub age: String,
    /// Enrolled course.
    pub course: String,
    /// Enrollment day as `YYYY-MM-DD`; blank lets the server choose.
    pub enrollment_date: String,
}

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

impl StudentForm {
    /// Prefill the form from an existing record for editing.
    pub fn from_student(student: &Student) -> Self {
        Self {
            name: student.name.clone(),
            email: student.email.clone(),
            age: student.age.to_string(),
            course: student.course.clone(),
            enrollment_date: student.enrollment_date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Check every field and collect the failures.
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        if self.name.trim().is_empty() {
            errors.insert(FormField::Name, "Name is required");
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert(FormField::Email, "Email is required");
        } else if !email_regex().is_some_and(|regex| regex.is_match(email)) {
            errors.insert(FormField::Email, "Please enter a valid email");
        }

        let age = self.age.trim();
        if age.is_empty() {
            errors.insert(FormField::Age, "Age is required");
        } else if parse_age(age).is_none() {
            errors.insert(FormField::Age, "Please enter a valid age");
        }

        if self.course.trim().is_empty() {
            errors.insert(FormField::Course, "Course is required");
        }

        let date = self.enrollment_date.trim();
        if !date.is_empty() && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            errors.insert(
                FormField::EnrollmentDate,
                "Please enter a valid enrollment date (YYYY-MM-DD)",
            );
        }

        errors
    }

    /// Validate and convert to a request body.
    ///
    /// # Errors
    ///
    /// Returns the collected [`FormErrors`] when any field is invalid.
    pub fn to_payload(&self) -> Result<StudentPayload, FormErrors> {
        let errors = self.validate();
        let age = parse_age(self.age.trim());
        match age {
            Some(age) if errors.is_empty() => Ok(StudentPayload {
                name: self.name.trim().to_owned(),
                email: self.email.trim().to_owned(),
                age,
                course: self.course.trim().to_owned(),
                enrollment_date: NaiveDate::parse_from_str(self.enrollment_date.trim(), "%Y-%m-%d")
                    .ok(),
            }),
            _ => Err(errors),
        }
    }
}

fn parse_age(text: &str) -> Option<u8> {
    text.parse::<i64>()
        .ok()
        .filter(|years| (AGE_MIN..=AGE_MAX).contains(years))
        .and_then(|years| u8::try_from(years).ok())
}
