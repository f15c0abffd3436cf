//! Diesel table definitions for the PostgreSQL schema.
//!
//! Must match `backend/migrations`; regenerate with `diesel print-schema`
//! when a migration changes the table.

diesel::table! {
    /// User records.
    users (id) {
        /// Primary key, assigned from a sequence unless supplied.
        id -> Int8,
        /// Non-empty display name.
        name -> Text,
        /// Non-empty biography.
        bio -> Text,
    }
}
