use std::collections::BTreeMap;
use std::path::Path;

use crate::client::upload::{embed_file, UploadError};
use crate::models::{CoordinatesInput, NumberInput, Property, PropertyInput, PropertyType};

/// Field-keyed messages from client-side form validation
pub type FormErrors = BTreeMap<&'static str, &'static str>;

/// Add/edit form contents, kept as the user typed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyForm {
    pub name: String,
    pub kind: Option<PropertyType>,
    pub location: String,
    pub price: String,
    pub description: String,
    pub image: String,
    pub lat: String,
    pub lng: String,
}

impl PropertyForm {
    /// Prefill the edit form from an existing record
    pub fn from_property(property: &Property) -> Self {
        Self {
            name: property.name.clone(),
            kind: Some(property.kind),
            location: property.location.clone(),
            price: property.price.to_string(),
            description: property.description.clone(),
            image: property.image.clone(),
            lat: property.coordinates.lat.to_string(),
            lng: property.coordinates.lng.to_string(),
        }
    }

    /// Use a local JPG, PNG or MP4 file as the listing's image
    pub fn attach_file(&mut self, path: &Path) -> Result<(), UploadError> {
        self.image = embed_file(path)?;
        Ok(())
    }

    /// Check the form before submitting; the server still re-validates.
    ///
    /// Coordinates are only sent when both are filled in.
    pub fn validate(&self) -> Result<PropertyInput, FormErrors> {
        let mut errors = FormErrors::new();

        if self.name.trim().is_empty() {
            errors.insert("name", "Property name is required");
        }
        if self.kind.is_none() {
            errors.insert("type", "Property type is required");
        }
        if self.location.trim().is_empty() {
            errors.insert("location", "Location is required");
        }
        let price = self.price.trim().parse::<f64>().ok().filter(|p| p.is_finite());
        if !matches!(price, Some(p) if p > 0.0) {
            errors.insert("price", "Valid price is required");
        }
        if self.description.trim().is_empty() {
            errors.insert("description", "Description is required");
        }
        if self.image.trim().is_empty() {
            errors.insert("image", "Image URL is required");
        }

        let coordinates = if !self.lat.trim().is_empty() && !self.lng.trim().is_empty() {
            match (self.lat.trim().parse::<f64>(), self.lng.trim().parse::<f64>()) {
                (Ok(lat), Ok(lng)) => Some(CoordinatesInput {
                    lat: Some(NumberInput::Number(lat)),
                    lng: Some(NumberInput::Number(lng)),
                }),
                _ => {
                    errors.insert("coordinates", "Coordinates must be numbers");
                    None
                }
            }
        } else {
            None
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(PropertyInput {
            name: Some(self.name.clone()),
            kind: self.kind.map(|k| k.as_str().to_string()),
            location: Some(self.location.clone()),
            price: price.map(NumberInput::Number),
            description: Some(self.description.clone()),
            image: Some(self.image.clone()),
            coordinates,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> PropertyForm {
        PropertyForm {
            name: "Residential Plot".into(),
            kind: Some(PropertyType::Plot),
            location: "Jaipur".into(),
            price: "180000".into(),
            description: "Excellent plot for housing colonies.".into(),
            image: "https://example.com/plot.jpg".into(),
            lat: String::new(),
            lng: String::new(),
        }
    }

    #[test]
    fn complete_form_produces_payload() {
        let input = filled().validate().unwrap();
        assert_eq!(input.kind.as_deref(), Some("Plot"));
        assert_eq!(input.price, Some(NumberInput::Number(180000.0)));
        assert!(input.coordinates.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errors = PropertyForm::default().validate().unwrap_err();
        let fields: Vec<&str> = errors.keys().copied().collect();
        assert_eq!(
            fields,
            vec!["description", "image", "location", "name", "price", "type"]
        );
    }

    #[test]
    fn price_must_be_positive() {
        let mut form = filled();
        form.price = "0".into();
        assert_eq!(
            form.validate().unwrap_err().get("price"),
            Some(&"Valid price is required")
        );

        form.price = "abc".into();
        assert!(form.validate().unwrap_err().contains_key("price"));
    }

    #[test]
    fn coordinates_need_both_components() {
        let mut form = filled();
        form.lat = "26.9124".into();
        assert!(form.validate().unwrap().coordinates.is_none());

        form.lng = "75.7873".into();
        let coordinates = form.validate().unwrap().coordinates.unwrap();
        assert_eq!(coordinates.lat, Some(NumberInput::Number(26.9124)));
        assert_eq!(coordinates.lng, Some(NumberInput::Number(75.7873)));
    }

    #[test]
    fn non_numeric_coordinates_are_rejected() {
        let mut form = filled();
        form.lat = "north".into();
        form.lng = "75.7873".into();
        assert!(form.validate().unwrap_err().contains_key("coordinates"));
    }

    #[test]
    fn attached_file_becomes_embedded_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.jpg");
        std::fs::write(&path, [0xff, 0xd8, 0xff]).unwrap();

        let mut form = filled();
        form.attach_file(&path).unwrap();
        let input = form.validate().unwrap();
        assert_eq!(input.image.as_deref(), Some("data:image/jpeg;base64,/9j/"));
    }

    #[test]
    fn rejected_file_keeps_previous_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let mut form = filled();
        assert!(form.attach_file(&path).is_err());
        assert_eq!(form.image, "https://example.com/plot.jpg");
    }
}
