//! Student record model.
//!
//! Each business field is a validated newtype, so a [`Student`] value always
//! carries a complete, well-formed record.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Smallest accepted age.
pub const AGE_MIN: i64 = 1;
/// Largest accepted age.
pub const AGE_MAX: i64 = 120;

const ENROLLMENT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation errors returned by the student field constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentValidationError {
    #[error("student id must be a valid UUID")]
    InvalidId,
    #[error("name must not be empty")]
    EmptyName,
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must look like local@domain.tld")]
    InvalidEmail,
    #[error("age must be between {min} and {max}")]
    AgeOutOfRange { min: i64, max: i64 },
    #[error("course must not be empty")]
    EmptyCourse,
    #[error("enrollment date must be formatted as YYYY-MM-DD")]
    InvalidEnrollmentDate,
}

/// Store-assigned student identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StudentId(Uuid);

impl StudentId {
    /// Parse an identifier received from a client.
    pub fn new(id: impl AsRef<str>) -> Result<Self, StudentValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw || raw.is_empty() {
            return Err(StudentValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| StudentValidationError::InvalidId)
    }

    /// Wrap an identifier produced by the record store.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh identifier, for stores that do not assign their own.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

macro_rules! non_empty_text {
    ($(#[$meta:meta])* $name:ident, $empty:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Validate and construct the value from owned input.
            pub fn new(value: impl Into<String>) -> Result<Self, StudentValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(StudentValidationError::$empty);
                }
                Ok(Self(value))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_text!(
    /// Student's full name.
    StudentName,
    EmptyName
);

non_empty_text!(
    /// Course the student is enrolled in.
    Course,
    EmptyCourse
);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address in `local@domain.tld` shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an email address.
    ///
    /// # Examples
    /// ```
    /// use student_records::domain::EmailAddress;
    ///
    /// assert!(EmailAddress::new("ada@example.com").is_ok());
    /// assert!(EmailAddress::new("ada@example").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, StudentValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(StudentValidationError::EmptyEmail);
        }
        if !email_regex().is_match(&value) {
            return Err(StudentValidationError::InvalidEmail);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Age in whole years, within [`AGE_MIN`]..=[`AGE_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Age(u8);

impl Age {
    /// Validate and construct an age.
    pub fn new(years: i64) -> Result<Self, StudentValidationError> {
        if !(AGE_MIN..=AGE_MAX).contains(&years) {
            return Err(StudentValidationError::AgeOutOfRange {
                min: AGE_MIN,
                max: AGE_MAX,
            });
        }
        u8::try_from(years)
            .map(Self)
            .map_err(|_| StudentValidationError::AgeOutOfRange {
                min: AGE_MIN,
                max: AGE_MAX,
            })
    }

    /// Age in years.
    pub fn years(self) -> u8 {
        self.0
    }
}

/// Calendar date on which the student enrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EnrollmentDate(NaiveDate);

impl EnrollmentDate {
    /// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
    ///
    /// # Examples
    /// ```
    /// use student_records::domain::EnrollmentDate;
    ///
    /// let date = EnrollmentDate::parse("2024-09-01").expect("valid date");
    /// assert_eq!(date.to_string(), "2024-09-01");
    /// assert!(EnrollmentDate::parse("01/09/2024").is_err());
    /// ```
    pub fn parse(value: &str) -> Result<Self, StudentValidationError> {
        NaiveDate::parse_from_str(value.trim(), ENROLLMENT_DATE_FORMAT)
            .map(Self)
            .map_err(|_| StudentValidationError::InvalidEnrollmentDate)
    }

    /// Wrap an already-parsed date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Underlying calendar date.
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for EnrollmentDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ENROLLMENT_DATE_FORMAT))
    }
}

/// Persisted student record.
///
/// ## Invariants
/// - `id` never changes after creation.
/// - All five business fields are always populated and valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: StudentId,
    #[schema(value_type = String, example = "Ada Lovelace")]
    pub name: StudentName,
    #[schema(value_type = String, example = "ada@example.com")]
    pub email: EmailAddress,
    #[schema(value_type = u8, example = 30)]
    pub age: Age,
    #[schema(value_type = String, example = "Mathematics")]
    pub course: Course,
    #[schema(value_type = String, format = Date, example = "2024-09-01")]
    pub enrollment_date: EnrollmentDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fully resolved field set for a record about to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: StudentName,
    pub email: EmailAddress,
    pub age: Age,
    pub course: Course,
    pub enrollment_date: EnrollmentDate,
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub name: Option<StudentName>,
    pub email: Option<EmailAddress>,
    pub age: Option<Age>,
    pub course: Option<Course>,
    pub enrollment_date: Option<EnrollmentDate>,
}

impl StudentChanges {
    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.age.is_none()
            && self.course.is_none()
            && self.enrollment_date.is_none()
    }

    /// Overwrite the supplied fields on `student`.
    ///
    /// Returns `true` when at least one stored value changed.
    ///
    /// # Examples
    /// ```
    /// use student_records::domain::{Age, StudentChanges};
    ///
    /// let changes = StudentChanges {
    ///     age: Some(Age::new(31).expect("valid age")),
    ///     ..StudentChanges::default()
    /// };
    /// assert!(!changes.is_empty());
    /// ```
    pub fn apply_to(self, student: &mut Student) -> bool {
        let mut changed = false;
        if let Some(name) = self.name {
            changed |= replace_if_different(&mut student.name, name);
        }
        if let Some(email) = self.email {
            changed |= replace_if_different(&mut student.email, email);
        }
        if let Some(age) = self.age {
            changed |= replace_if_different(&mut student.age, age);
        }
        if let Some(course) = self.course {
            changed |= replace_if_different(&mut student.course, course);
        }
        if let Some(enrollment_date) = self.enrollment_date {
            changed |= replace_if_different(&mut student.enrollment_date, enrollment_date);
        }
        changed
    }
}

fn replace_if_different<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
