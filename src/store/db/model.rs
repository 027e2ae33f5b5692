//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::properties;

/// Database row for a property.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = properties)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PropertyRow {
    pub seq: i64,
    pub id: String,
    pub name: String,
    pub kind: String,
    pub location: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub lat: f64,
    pub lng: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Database row for a property (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = properties)]
pub struct NewPropertyRow {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub location: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub lat: f64,
    pub lng: f64,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields rewritten by a full-document update.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = properties)]
pub struct PropertyChangeset {
    pub name: String,
    pub kind: String,
    pub location: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub lat: f64,
    pub lng: f64,
    pub updated_at: String,
}
