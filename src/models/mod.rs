use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod property_type;
pub mod validation;

pub use property_type::{PropertyType, UnknownPropertyType};
pub use validation::{
    CoordinatesInput, FieldError, NewProperty, NumberInput, PropertyInput, ValidationErrors,
};

/// Placeholder image used when a listing is saved without one
pub const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1560518883-ce09059eeffa?w=800&h=600&fit=crop";

/// Geographic position used for map display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Default for Coordinates {
    /// New Delhi
    fn default() -> Self {
        Self {
            lat: 28.6139,
            lng: 77.2090,
        }
    }
}

/// Core property data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(alias = "_id")]
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    pub location: String,
    pub price: f64,
    pub description: String,
    pub image: String,
    pub coordinates: Coordinates,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Build the stored document for validated data
    pub fn from_new(id: Uuid, data: NewProperty, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: data.name,
            kind: data.kind,
            location: data.location,
            price: data.price,
            description: data.description,
            image: data.image,
            coordinates: data.coordinates,
            created_at,
            updated_at: created_at,
        }
    }

    /// Replace every user-editable field, keeping id and creation time
    pub fn replace(&mut self, data: NewProperty, updated_at: DateTime<Utc>) {
        self.name = data.name;
        self.kind = data.kind;
        self.location = data.location;
        self.price = data.price;
        self.description = data.description;
        self.image = data.image;
        self.coordinates = data.coordinates;
        self.updated_at = updated_at;
    }

    /// Price in rupees with Indian digit grouping, e.g. `₹2,50,000`
    pub fn formatted_price(&self) -> String {
        format!("₹{}", group_indian(self.price.round() as u64))
    }
}

/// Last three digits form one group, the rest are grouped in pairs
fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
