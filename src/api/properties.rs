//! `/api/properties` route handlers.
//!
//! Each handler wraps exactly one store call and shapes its result into the
//! JSON envelope.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use crate::api::envelope::{Empty, Envelope};
use crate::api::error::ApiError;
use crate::api::AppState;
use crate::models::{Property, PropertyInput, PropertyType};
use crate::store::PropertyFilter;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_properties).post(create_property))
        .route(
            "/:id",
            get(get_property).put(update_property).delete(delete_property),
        )
}

/// Raw query string for the list endpoint; empty values count as absent
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub search: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A price bound, or `Err(())` when the raw value is not a number.
///
/// A bound that is not a number can never be satisfied, so the query
/// matches nothing rather than failing.
fn parse_price(value: Option<String>) -> Result<Option<f64>, ()> {
    match non_empty(value) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<f64>() {
            Ok(price) if !price.is_nan() => Ok(Some(price)),
            _ => Err(()),
        },
    }
}

impl ListQuery {
    /// Store filter for this query, or `None` when no document can match:
    /// an unknown `type` or a price bound that is not a number.
    pub fn into_filter(self) -> Option<PropertyFilter> {
        let kind = match non_empty(self.kind) {
            None => None,
            Some(raw) => Some(raw.trim().parse::<PropertyType>().ok()?),
        };

        Some(PropertyFilter {
            kind,
            min_price: parse_price(self.min_price).ok()?,
            max_price: parse_price(self.max_price).ok()?,
            search: self.search.filter(|s| !s.is_empty()),
        })
    }
}

#[tracing::instrument(skip(state, query))]
pub async fn list_properties(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Envelope<Vec<Property>>>, ApiError> {
    let Query(query) = query?;
    let Some(filter) = query.into_filter() else {
        tracing::debug!("query can never match, returning no properties");
        return Ok(Json(Envelope::list(Vec::new())));
    };
    tracing::debug!(?filter, "listing properties");

    let properties = state.store.list(&filter).await?;
    tracing::info!(count = properties.len(), "listed properties");

    Ok(Json(Envelope::list(properties)))
}

#[tracing::instrument(skip(state))]
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Property>>, ApiError> {
    let property = state.store.get_by_id(&id).await?;
    Ok(Json(Envelope::ok(property)))
}

#[tracing::instrument(skip(state, payload))]
pub async fn create_property(
    State(state): State<AppState>,
    payload: Result<Json<PropertyInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Property>>), ApiError> {
    let Json(input) = payload?;

    let property = state.store.create(&input).await.inspect_err(|e| {
        tracing::warn!(error = %e, "failed to create property");
    })?;

    tracing::info!(
        property_id = %property.id,
        name = %property.name,
        kind = %property.kind,
        "created property"
    );

    Ok((StatusCode::CREATED, Json(Envelope::ok(property))))
}

#[tracing::instrument(skip(state, payload))]
pub async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PropertyInput>, JsonRejection>,
) -> Result<Json<Envelope<Property>>, ApiError> {
    let Json(input) = payload?;

    let property = state.store.update(&id, &input).await.inspect_err(|e| {
        tracing::warn!(error = %e, "failed to update property");
    })?;

    tracing::info!(property_id = %property.id, "updated property");
    Ok(Json(Envelope::ok(property)))
}

#[tracing::instrument(skip(state))]
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Empty>>, ApiError> {
    let removed = state.store.delete(&id).await?;

    tracing::info!(property_id = %removed.id, "deleted property");
    Ok(Json(Envelope::ok(Empty::new())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(kind: Option<&str>, min: Option<&str>, max: Option<&str>) -> ListQuery {
        ListQuery {
            kind: kind.map(String::from),
            min_price: min.map(String::from),
            max_price: max.map(String::from),
            search: None,
        }
    }

    #[test]
    fn empty_values_are_ignored() {
        let filter = query(Some(""), Some(" "), None).into_filter().unwrap();
        assert_eq!(filter, PropertyFilter::default());
    }

    #[test]
    fn parses_type_and_price_bounds() {
        let filter = query(Some("Retail Store"), Some("1000"), Some("2e5"))
            .into_filter()
            .unwrap();
        assert_eq!(filter.kind, Some(PropertyType::RetailStore));
        assert_eq!(filter.min_price, Some(1000.0));
        assert_eq!(filter.max_price, Some(200000.0));
    }

    #[test]
    fn unknown_type_or_non_numeric_bound_matches_nothing() {
        assert!(query(Some("Castle"), None, None).into_filter().is_none());
        assert!(query(None, Some("lots"), None).into_filter().is_none());
        assert!(query(None, None, Some("NaN")).into_filter().is_none());
    }
}
