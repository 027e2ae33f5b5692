use crate::models::{Coordinates, Property, PropertyType, DEFAULT_IMAGE};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const NAME_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// A number as it may arrive over the wire: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    /// `None` for blank text, `Some(Err)` for text that is not a number.
    fn resolve(&self) -> Option<Result<f64, ()>> {
        match self {
            NumberInput::Number(n) => Some(Ok(*n)),
            NumberInput::Text(s) if s.trim().is_empty() => None,
            NumberInput::Text(s) => Some(s.trim().parse::<f64>().map_err(|_| ())),
        }
    }
}

impl From<f64> for NumberInput {
    fn from(n: f64) -> Self {
        NumberInput::Number(n)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoordinatesInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<NumberInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<NumberInput>,
}

/// Unvalidated property payload, as received by create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<NumberInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<CoordinatesInput>,
}

/// A property payload that passed validation, with defaults applied.
///
/// Fields are private to the crate and [`PropertyInput::validate`] is the
/// only constructor, so every store backend can rely on the schema holding.
///
/// ```compile_fail
/// use property_dashboard::models::{Coordinates, NewProperty, PropertyType};
///
/// let unchecked = NewProperty {
///     name: String::new(),
///     kind: PropertyType::Plot,
///     location: String::new(),
///     price: -1.0,
///     description: String::new(),
///     image: String::new(),
///     coordinates: Coordinates::default(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub(crate) name: String,
    pub(crate) kind: PropertyType,
    pub(crate) location: String,
    pub(crate) price: f64,
    pub(crate) description: String,
    pub(crate) image: String,
    pub(crate) coordinates: Coordinates,
}

impl NewProperty {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PropertyType {
        self.kind
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field that failed validation, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.field).collect()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Property validation failed: ")?;
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Trimmed value of a required string, `None` when missing or blank.
fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl PropertyInput {
    pub fn validate(&self) -> Result<NewProperty, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = match required(&self.name) {
            None => {
                errors.push("name", "Please add a property name");
                None
            }
            Some(name) if name.chars().count() > NAME_MAX_CHARS => {
                errors.push("name", "Name cannot be more than 100 characters");
                None
            }
            Some(name) => Some(name.to_string()),
        };

        let kind = match required(&self.kind) {
            None => {
                errors.push("type", "Please add a property type");
                None
            }
            Some(raw) => match raw.parse::<PropertyType>() {
                Ok(kind) => Some(kind),
                Err(err) => {
                    errors.push("type", err.to_string());
                    None
                }
            },
        };

        let location = match required(&self.location) {
            None => {
                errors.push("location", "Please add a location");
                None
            }
            Some(location) => Some(location.to_string()),
        };

        let price = match self.price.as_ref().and_then(NumberInput::resolve) {
            None => {
                errors.push("price", "Please add a price");
                None
            }
            Some(Err(())) => {
                errors.push("price", "Price must be a number");
                None
            }
            Some(Ok(p)) if !p.is_finite() => {
                errors.push("price", "Price must be a number");
                None
            }
            Some(Ok(p)) if p < 0.0 => {
                errors.push("price", "Price cannot be negative");
                None
            }
            Some(Ok(p)) => Some(p),
        };

        // Descriptions keep their whitespace; blank ones count as missing.
        let description = match self.description.as_deref() {
            Some(d) if !d.trim().is_empty() => {
                if d.chars().count() > DESCRIPTION_MAX_CHARS {
                    errors.push(
                        "description",
                        "Description cannot be more than 500 characters",
                    );
                    None
                } else {
                    Some(d.to_string())
                }
            }
            _ => {
                errors.push("description", "Please add a description");
                None
            }
        };

        let image = required(&self.image)
            .unwrap_or(DEFAULT_IMAGE)
            .to_string();

        let coordinates = self.validate_coordinates(&mut errors);

        match (name, kind, location, price, description, coordinates) {
            (Some(name), Some(kind), Some(location), Some(price), Some(description), Some(coordinates))
                if errors.is_empty() =>
            {
                Ok(NewProperty {
                    name,
                    kind,
                    location,
                    price,
                    description,
                    image,
                    coordinates,
                })
            }
            _ => Err(errors),
        }
    }

    fn validate_coordinates(&self, errors: &mut ValidationErrors) -> Option<Coordinates> {
        let defaults = Coordinates::default();
        let Some(input) = &self.coordinates else {
            return Some(defaults);
        };

        let lat = bounded(
            input.lat.as_ref(),
            defaults.lat,
            90.0,
            "coordinates.lat",
            "Latitude",
            errors,
        );
        let lng = bounded(
            input.lng.as_ref(),
            defaults.lng,
            180.0,
            "coordinates.lng",
            "Longitude",
            errors,
        );

        Some(Coordinates {
            lat: lat?,
            lng: lng?,
        })
    }
}

fn bounded(
    value: Option<&NumberInput>,
    default: f64,
    limit: f64,
    field: &'static str,
    label: &str,
    errors: &mut ValidationErrors,
) -> Option<f64> {
    match value.and_then(NumberInput::resolve) {
        None => Some(default),
        Some(Ok(v)) if v.is_finite() && (-limit..=limit).contains(&v) => Some(v),
        Some(Ok(_)) => {
            errors.push(field, format!("{label} must be between -{limit} and {limit}"));
            None
        }
        Some(Err(())) => {
            errors.push(field, format!("{label} must be a number"));
            None
        }
    }
}

impl From<&NewProperty> for PropertyInput {
    fn from(data: &NewProperty) -> Self {
        Self {
            name: Some(data.name.clone()),
            kind: Some(data.kind.as_str().to_string()),
            location: Some(data.location.clone()),
            price: Some(data.price.into()),
            description: Some(data.description.clone()),
            image: Some(data.image.clone()),
            coordinates: Some(CoordinatesInput {
                lat: Some(data.coordinates.lat.into()),
                lng: Some(data.coordinates.lng.into()),
            }),
        }
    }
}

impl From<&Property> for PropertyInput {
    fn from(property: &Property) -> Self {
        Self {
            name: Some(property.name.clone()),
            kind: Some(property.kind.as_str().to_string()),
            location: Some(property.location.clone()),
            price: Some(property.price.into()),
            description: Some(property.description.clone()),
            image: Some(property.image.clone()),
            coordinates: Some(CoordinatesInput {
                lat: Some(property.coordinates.lat.into()),
                lng: Some(property.coordinates.lng.into()),
            }),
        }
    }
}
