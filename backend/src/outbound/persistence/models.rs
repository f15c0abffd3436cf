//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer.

use diesel::prelude::*;

use super::schema::users;

/// Row read back from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub name: String,
    pub bio: String,
}

/// Insertable row; a `None` id falls back to the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Option<i64>,
    pub name: &'a str,
    pub bio: &'a str,
}

/// Full replacement of the mutable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangesRow<'a> {
    pub name: &'a str,
    pub bio: &'a str,
}
