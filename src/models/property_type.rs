use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category of a property listing.
///
/// The set is closed: anything outside it is rejected when a payload is
/// validated, when a query is parsed and when a form is filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Plot,
    Shed,
    #[serde(rename = "Retail Store")]
    RetailStore,
    /// Kept distinct from `RetailStore`; existing records use both.
    #[serde(rename = "Piott Store")]
    PiottStore,
    Apartment,
    House,
    Villa,
    Condo,
    Townhouse,
    Land,
    Commercial,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a valid property type")]
pub struct UnknownPropertyType(pub String);

impl PropertyType {
    pub const ALL: [PropertyType; 11] = [
        PropertyType::Plot,
        PropertyType::Shed,
        PropertyType::RetailStore,
        PropertyType::PiottStore,
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Villa,
        PropertyType::Condo,
        PropertyType::Townhouse,
        PropertyType::Land,
        PropertyType::Commercial,
    ];

    /// Wire representation, as stored and sent over HTTP.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Plot => "Plot",
            PropertyType::Shed => "Shed",
            PropertyType::RetailStore => "Retail Store",
            PropertyType::PiottStore => "Piott Store",
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
            PropertyType::Villa => "Villa",
            PropertyType::Condo => "Condo",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Land => "Land",
            PropertyType::Commercial => "Commercial",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = UnknownPropertyType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownPropertyType(s.to_string()))
    }
}
