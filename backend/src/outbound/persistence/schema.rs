//! Diesel table definitions for the student store.
//!
//! Kept in step with `migrations/` by hand.

diesel::table! {
    /// Student records. `email` carries a unique index.
    students (id) {
        /// Store-assigned identifier (`gen_random_uuid()`).
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        /// Constrained to 1..=120 by a check constraint.
        age -> Int2,
        course -> Varchar,
        enrollment_date -> Date,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
