//! Internal Diesel row structs for the `students` table.
//!
//! These never cross into the domain; the repository converts them.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::students;

/// Row read from `students`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub age: i16,
    pub course: String,
    pub enrollment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable row; the store fills `id` and both timestamps.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub age: i16,
    pub course: &'a str,
    pub enrollment_date: NaiveDate,
}

/// Full overwrite of the business fields. `updated_at` is set by the query.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentChangeset<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub age: i16,
    pub course: &'a str,
    pub enrollment_date: NaiveDate,
}
