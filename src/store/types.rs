use crate::models::{Property, PropertyType};
use serde::{Deserialize, Serialize};

/// Filter for listing properties; every criterion is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyFilter {
    /// Exact type match
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PropertyType>,
    /// Minimum price, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    /// Maximum price, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    /// Substring of name or location. Case folding covers ASCII letters
    /// only, matching SQLite's `LIKE`, so both backends agree on results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl PropertyFilter {
    pub fn by_type(kind: PropertyType) -> Self {
        Self {
            kind: Some(kind),
            ..Default::default()
        }
    }

    pub fn by_search(search: impl Into<String>) -> Self {
        Self {
            search: Some(search.into()),
            ..Default::default()
        }
    }

    /// Search text, ignoring an empty string
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    pub fn matches(&self, property: &Property) -> bool {
        if let Some(kind) = self.kind {
            if property.kind != kind {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if property.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if property.price > max {
                return false;
            }
        }
        match self.search_term() {
            Some(term) => {
                let term = term.to_ascii_lowercase();
                property.name.to_ascii_lowercase().contains(&term)
                    || property.location.to_ascii_lowercase().contains(&term)
            }
            None => true,
        }
    }
}
