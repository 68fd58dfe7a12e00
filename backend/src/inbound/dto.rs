//! Request body parsing for create and update.
//!
//! Bodies are read as loose JSON objects. A field counts as *provided* only
//! when its value is truthy: `null`, `false`, `""`, and `0` are treated as
//! absent. Create requires name, email, age, and course to be provided;
//! update ignores absent fields and leaves the stored values untouched.
//! Provided values are then shape-validated.

use chrono::DateTime;
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::ports::CreateStudentRequest;
use crate::domain::{
    AGE_MAX, AGE_MIN, Age, Course, EmailAddress, EnrollmentDate, Error, StudentChanges,
    StudentName,
};

/// Returned when a create request lacks a required field.
pub const MISSING_FIELDS: &str = "Please provide all required fields: name, email, age, course";
/// Returned for a malformed email.
pub const INVALID_EMAIL: &str = "Please enter a valid email";
/// Returned for an age that is not an integer in range.
pub const INVALID_AGE: &str = "Please enter a valid age";
/// Returned for an unparseable enrollment date.
pub const INVALID_ENROLLMENT_DATE: &str = "Please enter a valid enrollment date (YYYY-MM-DD)";
/// Returned when the body is not JSON.
pub const INVALID_JSON: &str = "Request body must be valid JSON";
/// Returned when the body is JSON but not an object.
pub const NOT_AN_OBJECT: &str = "Request body must be a JSON object";

/// Documented shape of a create or update body.
///
/// Only used for the OpenAPI description; parsing goes through
/// [`parse_create`] and [`parse_update`] so falsy values can be filtered.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[expect(dead_code, reason = "fields only describe the OpenAPI schema")]
pub struct StudentPayload {
    #[schema(example = "Ada Lovelace")]
    name: Option<String>,
    #[schema(example = "ada@example.com")]
    email: Option<String>,
    #[schema(example = 30, minimum = 1, maximum = 120)]
    age: Option<i64>,
    #[schema(example = "Math")]
    course: Option<String>,
    #[schema(example = "2024-09-01")]
    enrollment_date: Option<String>,
}

/// Truthy fields extracted from a request body.
#[derive(Debug, Default)]
struct ProvidedFields<'a> {
    name: Option<&'a Value>,
    email: Option<&'a Value>,
    age: Option<&'a Value>,
    course: Option<&'a Value>,
    enrollment_date: Option<&'a Value>,
}

impl<'a> ProvidedFields<'a> {
    fn from_object(object: &'a Map<String, Value>) -> Self {
        let pick = |key: &str| object.get(key).filter(|value| is_truthy(value));
        Self {
            name: pick("name"),
            email: pick("email"),
            age: pick("age"),
            course: pick("course"),
            enrollment_date: pick("enrollmentDate"),
        }
    }
}

/// JavaScript-style truthiness for JSON values.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(Error::invalid_request(NOT_AN_OBJECT)),
        Err(_) => Err(Error::invalid_request(INVALID_JSON)),
    }
}

/// Scalars are coerced to text; structured values are rejected. Text is kept
/// exactly as submitted; trimming only decides whether it is blank.
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn name_from(value: &Value) -> Result<StudentName, Error> {
    text_of(value)
        .and_then(|text| StudentName::new(text).ok())
        .ok_or_else(|| Error::invalid_request(MISSING_FIELDS))
}

fn course_from(value: &Value) -> Result<Course, Error> {
    text_of(value)
        .and_then(|text| Course::new(text).ok())
        .ok_or_else(|| Error::invalid_request(MISSING_FIELDS))
}

fn email_from(value: &Value) -> Result<EmailAddress, Error> {
    value
        .as_str()
        .and_then(|text| EmailAddress::new(text).ok())
        .ok_or_else(|| Error::invalid_request(INVALID_EMAIL))
}

/// Whole-number age matching a float such as `30.0`.
fn integral_age(value: f64) -> Option<i64> {
    (AGE_MIN..=AGE_MAX).find(|years| i32::try_from(*years).is_ok_and(|y| f64::from(y) == value))
}

/// Accepts integers, integral floats, and numeric strings.
fn age_from(value: &Value) -> Result<Age, Error> {
    let years = match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(integral_age)),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };
    years
        .and_then(|years| Age::new(years).ok())
        .ok_or_else(|| Error::invalid_request(INVALID_AGE))
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
fn enrollment_date_from(value: &Value) -> Result<EnrollmentDate, Error> {
    let text = value
        .as_str()
        .map(str::trim)
        .ok_or_else(|| Error::invalid_request(INVALID_ENROLLMENT_DATE))?;
    EnrollmentDate::parse(text)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|stamp| EnrollmentDate::from_date(stamp.date_naive()))
        })
        .ok_or_else(|| Error::invalid_request(INVALID_ENROLLMENT_DATE))
}

/// Parse and validate a create body.
///
/// # Errors
///
/// Returns an invalid-request [`Error`] when the body is malformed, a required
/// field is absent or blank, or a provided value has the wrong shape.
pub fn parse_create(body: &[u8]) -> Result<CreateStudentRequest, Error> {
    let object = parse_object(body)?;
    let fields = ProvidedFields::from_object(&object);

    let (Some(name), Some(email), Some(age), Some(course)) =
        (fields.name, fields.email, fields.age, fields.course)
    else {
        return Err(Error::invalid_request(MISSING_FIELDS));
    };

    Ok(CreateStudentRequest {
        name: name_from(name)?,
        email: email_from(email)?,
        age: age_from(age)?,
        course: course_from(course)?,
        enrollment_date: fields.enrollment_date.map(enrollment_date_from).transpose()?,
    })
}

/// Parse and validate an update body into a partial change set.
///
/// # Errors
///
/// Returns an invalid-request [`Error`] when the body is malformed or a
/// provided value has the wrong shape.
pub fn parse_update(body: &[u8]) -> Result<StudentChanges, Error> {
    let object = parse_object(body)?;
    let fields = ProvidedFields::from_object(&object);

    Ok(StudentChanges {
        name: fields.name.map(name_from).transpose()?,
        email: fields.email.map(email_from).transpose()?,
        age: fields.age.map(age_from).transpose()?,
        course: fields.course.map(course_from).transpose()?,
        enrollment_date: fields.enrollment_date.map(enrollment_date_from).transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn bytes(value: &Value) -> Vec<u8> {
        serde_json::to_vec(value).expect("serialize body")
    }

    #[rstest]
    #[case(json!(null), false)]
    #[case(json!(false), false)]
    #[case(json!(""), false)]
    #[case(json!(0), false)]
    #[case(json!(0.0), false)]
    #[case(json!(" "), true)]
    #[case(json!("0"), true)]
    #[case(json!(31), true)]
    #[case(json!([]), true)]
    fn truthiness_follows_javascript(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_truthy(&value), expected);
    }

    #[rstest]
    fn create_accepts_a_complete_body() {
        let body = json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "age": 30,
            "course": "Math",
            "enrollmentDate": "2024-09-01"
        });
        let request = parse_create(&bytes(&body)).expect("valid body");
        assert_eq!(request.name.as_ref(), "Ada Lovelace");
        assert_eq!(request.age.years(), 30);
        assert_eq!(
            request.enrollment_date.map(|date| date.to_string()),
            Some("2024-09-01".to_owned())
        );
    }

    #[rstest]
    #[case(json!({"email": "ada@example.com", "age": 30, "course": "Math"}))]
    #[case(json!({"name": "", "email": "ada@example.com", "age": 30, "course": "Math"}))]
    #[case(json!({"name": "Ada", "email": "ada@example.com", "age": 0, "course": "Math"}))]
    #[case(json!({"name": "Ada", "email": null, "age": 30, "course": "Math"}))]
    #[case(json!({"name": "   ", "email": "ada@example.com", "age": 30, "course": "Math"}))]
    #[case(json!({}))]
    fn create_requires_all_fields(#[case] body: Value) {
        let err = parse_create(&bytes(&body)).expect_err("missing field");
        assert_eq!(err.message(), MISSING_FIELDS);
    }

    #[rstest]
    #[case(json!({"name": "Ada", "email": "not-an-email", "age": 30, "course": "Math"}), INVALID_EMAIL)]
    #[case(json!({"name": "Ada", "email": "ada@example.com", "age": 121, "course": "Math"}), INVALID_AGE)]
    #[case(json!({"name": "Ada", "email": "ada@example.com", "age": 30.5, "course": "Math"}), INVALID_AGE)]
    #[case(json!({"name": "Ada", "email": "ada@example.com", "age": "thirty", "course": "Math"}), INVALID_AGE)]
    #[case(
        json!({"name": "Ada", "email": "ada@example.com", "age": 30, "course": "Math", "enrollmentDate": "soon"}),
        INVALID_ENROLLMENT_DATE
    )]
    fn create_rejects_malformed_values(#[case] body: Value, #[case] message: &str) {
        let err = parse_create(&bytes(&body)).expect_err("malformed value");
        assert_eq!(err.message(), message);
    }

    #[rstest]
    fn create_accepts_numeric_string_age_and_timestamp_dates() {
        let body = json!({
            "name": "Ada",
            "email": "ada@example.com",
            "age": "42",
            "course": "Math",
            "enrollmentDate": "2024-09-01T10:00:00Z"
        });
        let request = parse_create(&bytes(&body)).expect("valid body");
        assert_eq!(request.age.years(), 42);
        assert_eq!(
            request.enrollment_date.map(|date| date.to_string()),
            Some("2024-09-01".to_owned())
        );
    }

    #[rstest]
    fn create_treats_empty_enrollment_date_as_absent() {
        let body = json!({
            "name": "Ada",
            "email": "ada@example.com",
            "age": 30,
            "course": "Math",
            "enrollmentDate": ""
        });
        let request = parse_create(&bytes(&body)).expect("valid body");
        assert!(request.enrollment_date.is_none());
    }

    #[rstest]
    fn create_keeps_text_as_submitted() {
        let body = json!({
            "name": "Ada Lovelace ",
            "email": "ada@example.com",
            "age": 30,
            "course": " Math"
        });
        let request = parse_create(&bytes(&body)).expect("valid body");
        assert_eq!(request.name.as_ref(), "Ada Lovelace ");
        assert_eq!(request.course.as_ref(), " Math");
    }

    #[rstest]
    fn padded_email_is_not_a_valid_email() {
        let body = json!({"name": "Ada", "email": " ada@example.com", "age": 30, "course": "Math"});
        let err = parse_create(&bytes(&body)).expect_err("padded email");
        assert_eq!(err.message(), INVALID_EMAIL);
    }

    #[rstest]
    #[case(json!(30.0), Some(30))]
    #[case(json!(120.0), Some(120))]
    #[case(json!(1.0), Some(1))]
    #[case(json!(30.5), None)]
    #[case(json!(121.0), None)]
    #[case(json!(-5.0), None)]
    #[case(json!(1e300), None)]
    fn integral_floats_convert_without_truncation(
        #[case] age: Value,
        #[case] expected: Option<u8>,
    ) {
        assert_eq!(age_from(&age).ok().map(Age::years), expected);
    }

    #[rstest]
    fn update_ignores_falsy_fields() {
        let body = json!({"name": "", "email": null, "age": 0, "course": "Physics"});
        let changes = parse_update(&bytes(&body)).expect("valid body");
        assert!(changes.name.is_none());
        assert!(changes.email.is_none());
        assert!(changes.age.is_none());
        assert_eq!(changes.course.map(String::from), Some("Physics".to_owned()));
    }

    #[rstest]
    fn update_with_empty_body_changes_nothing() {
        let changes = parse_update(b"").expect("empty body");
        assert!(changes.is_empty());
    }

    #[rstest]
    fn update_still_validates_provided_values() {
        let err = parse_update(&bytes(&json!({"email": "nope"}))).expect_err("bad email");
        assert_eq!(err.message(), INVALID_EMAIL);
    }

    #[rstest]
    #[case(b"{not json".as_slice(), INVALID_JSON)]
    #[case(b"[1, 2]".as_slice(), NOT_AN_OBJECT)]
    fn malformed_bodies_are_rejected(#[case] body: &[u8], #[case] message: &str) {
        let err = parse_update(body).expect_err("malformed body");
        assert_eq!(err.message(), message);
    }
}
