use crate::error::Result;
use crate::models::{CoordinatesInput, Property, PropertyInput, ValidationErrors};
use crate::store::PropertyStore;
use tracing::info;

fn listing(
    name: &str,
    kind: &str,
    location: &str,
    price: f64,
    description: &str,
    (lat, lng): (f64, f64),
) -> PropertyInput {
    PropertyInput {
        name: Some(name.to_string()),
        kind: Some(kind.to_string()),
        location: Some(location.to_string()),
        price: Some(price.into()),
        description: Some(description.to_string()),
        image: None,
        coordinates: Some(CoordinatesInput {
            lat: Some(lat.into()),
            lng: Some(lng.into()),
        }),
    }
}

/// Sample listings used to populate an empty dashboard
pub fn sample_listings() -> Vec<PropertyInput> {
    vec![
        listing(
            "Luxury Plot in Pune",
            "Plot",
            "Pune",
            250000.0,
            "A large plot of land available for development in prime location.",
            (18.5204, 73.8567),
        ),
        listing(
            "Commercial Shed",
            "Shed",
            "Bangalore",
            75000.0,
            "A spacious shed with yard & parking available.",
            (12.9716, 77.5946),
        ),
        listing(
            "Prime Retail Space",
            "Retail Store",
            "Hyderabad",
            150000.0,
            "A commercial retail space in prime location with high footfall.",
            (17.3850, 78.4867),
        ),
        listing(
            "IT Hub Property",
            "Piott Store",
            "Khemrai",
            200000.0,
            "Upcoming plot situated near IT companies with excellent connectivity.",
            (19.0760, 72.8777),
        ),
        listing(
            "Central Plot",
            "Plot",
            "Chennai",
            300000.0,
            "Large plot available for development in central area with all amenities.",
            (13.0827, 80.2707),
        ),
        listing(
            "Industrial Shed",
            "Shed",
            "Mumbai",
            90000.0,
            "Large industrial shed suitable for warehouse or manufacturing.",
            (19.0760, 72.8777),
        ),
        listing(
            "City Center Retail",
            "Retail Store",
            "Kolkata",
            175000.0,
            "Commercial retail space for immediate sale in city center.",
            (22.5726, 88.3639),
        ),
        listing(
            "Residential Plot",
            "Plot",
            "Jaipur",
            180000.0,
            "Excellent plot for housing colonies, perfect for development.",
            (26.9124, 75.7873),
        ),
    ]
}

/// Replace the store's contents with `listings`.
///
/// Every listing is validated before anything is removed, so an invalid
/// listing leaves the existing data untouched.
pub async fn seed_with(
    store: &dyn PropertyStore,
    listings: &[PropertyInput],
) -> Result<Vec<Property>> {
    let data = listings
        .iter()
        .map(PropertyInput::validate)
        .collect::<std::result::Result<Vec<_>, ValidationErrors>>()?;

    let cleared = store.clear().await?;
    info!(cleared, "Cleared existing data");

    let properties = store.insert_all(data).await?;
    info!("🌱 Seeded {} properties successfully", properties.len());

    Ok(properties)
}

/// Replace the store's contents with the sample listings
pub async fn seed(store: &dyn PropertyStore) -> Result<Vec<Property>> {
    seed_with(store, &sample_listings()).await
}
