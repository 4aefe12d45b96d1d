use serde::{Deserialize, Serialize};
use std::fmt;

/// Latitude/longitude pair in decimal degrees.
///
/// Values are validated on construction, so every `Coordinate` in circulation
/// is finite and within the usual geographic bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate", into = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocatorError> {
        let latitude_ok = latitude.is_finite() && (-90.0..=90.0).contains(&latitude);
        let longitude_ok = longitude.is_finite() && (-180.0..=180.0).contains(&longitude);

        if latitude_ok && longitude_ok {
            Ok(Self {
                latitude,
                longitude,
            })
        } else {
            Err(LocatorError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }

    /// Builds a coordinate from compile-time constants already known to be in range.
    pub(crate) const fn trusted(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = LocatorError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl From<Coordinate> for RawCoordinate {
    fn from(value: Coordinate) -> Self {
        Self {
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShelterId(pub u32);

impl fmt::Display for ShelterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One rescue or shelter organization in the directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShelterRecord {
    pub id: ShelterId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub hours: String,
    pub services: Vec<String>,
    pub rating: f32,
    #[serde(flatten)]
    pub location: Coordinate,
}

impl ShelterRecord {
    /// True when any listed service contains `tag`, ignoring case.
    pub fn offers(&self, tag: &str) -> bool {
        let needle = tag.trim().to_lowercase();
        self.services
            .iter()
            .any(|service| service.to_lowercase().contains(&needle))
    }
}

/// A shelter paired with its distance from the observer for a single query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedShelter {
    #[serde(flatten)]
    pub shelter: ShelterRecord,
    pub distance_miles: f64,
}

impl RankedShelter {
    pub fn distance_label(&self) -> String {
        format!("{:.1} mi", self.distance_miles)
    }
}

/// Service-category filter applied to ranked results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ServiceFilter {
    #[default]
    All,
    Tag(String),
}

impl ServiceFilter {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Tag(trimmed.to_string())
        }
    }

    pub fn matches(&self, shelter: &ShelterRecord) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => shelter.offers(tag),
        }
    }
}

impl From<Option<&str>> for ServiceFilter {
    fn from(value: Option<&str>) -> Self {
        value.map(Self::parse).unwrap_or_default()
    }
}

impl fmt::Display for ServiceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Tag(tag) => write!(f, "{tag}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocatorError {
    #[error("invalid coordinate ({latitude}, {longitude}): latitude must be within ±90 and longitude within ±180")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
    #[error("no eligible shelter found near the requested location")]
    NoEligibleShelter,
    #[error("could not resolve '{0}' to a location")]
    AddressNotResolved(String),
    #[error("a location is required: provide latitude and longitude or an address")]
    MissingObserver,
}

impl LocatorError {
    /// Advice shown to people when no shelter can take their case.
    pub const EMERGENCY_FALLBACK: &'static str =
        "No nearby shelter can take this request. If an animal is in immediate danger, contact local emergency services directly.";
}
