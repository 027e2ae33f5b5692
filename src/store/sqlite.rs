//! SQLite store implementation using Diesel.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::error::{PropertyError, Result};
use crate::models::{Coordinates, NewProperty, Property, PropertyType};
use crate::store::db::model::{NewPropertyRow, PropertyChangeset, PropertyRow};
use crate::store::db::schema::properties;
use crate::store::db::DbPool;
use crate::store::traits::{parse_id, PropertyStore};
use crate::store::types::PropertyFilter;

/// SQLite-backed property store.
pub struct SqliteStore {
    pool: DbPool,
}

/// Fixed-width timestamps so text ordering matches time ordering.
fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)
        .map_err(|e| PropertyError::Parse(e.to_string()))?
        .with_timezone(&Utc))
}

/// Escape LIKE wildcards so search text matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

impl SqliteStore {
    /// Create a new SQLite property store.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        self.pool
            .get()
            .map_err(|e| PropertyError::Connection(e.to_string()))
    }

    fn to_row(id: Uuid, data: &NewProperty, at: DateTime<Utc>) -> NewPropertyRow {
        NewPropertyRow {
            id: id.to_string(),
            name: data.name.clone(),
            kind: data.kind.as_str().to_string(),
            location: data.location.clone(),
            price: data.price,
            description: data.description.clone(),
            image: data.image.clone(),
            lat: data.coordinates.lat,
            lng: data.coordinates.lng,
            created_at: timestamp(at),
            updated_at: timestamp(at),
        }
    }

    fn from_row(row: PropertyRow) -> Result<Property> {
        let id = Uuid::parse_str(&row.id).map_err(|e| PropertyError::Parse(e.to_string()))?;
        let kind = row
            .kind
            .parse::<PropertyType>()
            .map_err(|e| PropertyError::Parse(e.to_string()))?;

        Ok(Property {
            id,
            name: row.name,
            kind,
            location: row.location,
            price: row.price,
            description: row.description,
            image: row.image,
            coordinates: Coordinates {
                lat: row.lat,
                lng: row.lng,
            },
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }

    fn find(conn: &mut SqliteConnection, id: &Uuid) -> Result<Property> {
        let row: Option<PropertyRow> = properties::table
            .filter(properties::id.eq(id.to_string()))
            .select(PropertyRow::as_select())
            .first(conn)
            .optional()
            .map_err(|e| PropertyError::Database(e.to_string()))?;

        row.map(Self::from_row)
            .transpose()?
            .ok_or(PropertyError::NotFound)
    }
}

#[async_trait]
impl PropertyStore for SqliteStore {
    async fn insert(&self, data: NewProperty) -> Result<Property> {
        let row = Self::to_row(Uuid::new_v4(), &data, Utc::now());
        let mut conn = self.conn()?;

        diesel::insert_into(properties::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| PropertyError::Database(e.to_string()))?;

        let id = parse_id(&row.id)?;
        Self::find(&mut conn, &id)
    }

    async fn insert_all(&self, data: Vec<NewProperty>) -> Result<Vec<Property>> {
        let now = Utc::now();
        let rows: Vec<NewPropertyRow> = data
            .iter()
            .map(|d| Self::to_row(Uuid::new_v4(), d, now))
            .collect();
        let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let mut conn = self.conn()?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::insert_into(properties::table)
                .values(&rows)
                .execute(conn)?;

            properties::table
                .filter(properties::id.eq_any(&ids))
                .order(properties::seq.asc())
                .select(PropertyRow::as_select())
                .load::<PropertyRow>(conn)
        })
        .map_err(|e| PropertyError::Database(e.to_string()))?
        .into_iter()
        .map(Self::from_row)
        .collect()
    }

    async fn get_by_id(&self, id: &str) -> Result<Property> {
        let id = parse_id(id)?;
        let mut conn = self.conn()?;
        Self::find(&mut conn, &id)
    }

    async fn list(&self, filter: &PropertyFilter) -> Result<Vec<Property>> {
        let mut conn = self.conn()?;

        let mut query = properties::table
            .select(PropertyRow::as_select())
            .into_boxed();
        if let Some(kind) = filter.kind {
            query = query.filter(properties::kind.eq(kind.as_str()));
        }
        if let Some(min) = filter.min_price {
            query = query.filter(properties::price.ge(min));
        }
        if let Some(max) = filter.max_price {
            query = query.filter(properties::price.le(max));
        }
        if let Some(term) = filter.search_term() {
            let pattern = like_pattern(term);
            query = query.filter(
                properties::name
                    .like(pattern.clone())
                    .escape('\\')
                    .or(properties::location.like(pattern).escape('\\')),
            );
        }

        let rows: Vec<PropertyRow> = query
            .order((properties::created_at.desc(), properties::seq.desc()))
            .load(&mut conn)
            .map_err(|e| PropertyError::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    async fn replace(&self, id: &str, data: NewProperty) -> Result<Property> {
        let id = parse_id(id)?;
        let changes = PropertyChangeset {
            name: data.name,
            kind: data.kind.as_str().to_string(),
            location: data.location,
            price: data.price,
            description: data.description,
            image: data.image,
            lat: data.coordinates.lat,
            lng: data.coordinates.lng,
            updated_at: timestamp(Utc::now()),
        };
        let mut conn = self.conn()?;

        let updated = diesel::update(properties::table.filter(properties::id.eq(id.to_string())))
            .set(&changes)
            .execute(&mut conn)
            .map_err(|e| PropertyError::Database(e.to_string()))?;

        if updated == 0 {
            return Err(PropertyError::NotFound);
        }
        Self::find(&mut conn, &id)
    }

    async fn delete(&self, id: &str) -> Result<Property> {
        let id = parse_id(id)?;
        let mut conn = self.conn()?;

        let existing = Self::find(&mut conn, &id)?;
        let deleted = diesel::delete(properties::table.filter(properties::id.eq(id.to_string())))
            .execute(&mut conn)
            .map_err(|e| PropertyError::Database(e.to_string()))?;

        // A concurrent delete may have won between the read and the write.
        if deleted == 0 {
            return Err(PropertyError::NotFound);
        }
        Ok(existing)
    }

    async fn clear(&self) -> Result<usize> {
        let mut conn = self.conn()?;
        diesel::delete(properties::table)
            .execute(&mut conn)
            .map_err(|e| PropertyError::Database(e.to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
