use super::domain::{Coordinate, LocatorError};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::warn;

/// Turns free-text addresses into coordinates.
pub trait AddressResolver: Send + Sync {
    fn resolve(&self, text: &str) -> Result<Coordinate, LocatorError>;
}

/// Offline resolver covering the service area.
///
/// Understands `"lat, lng"` pairs (the format the report form fills in after
/// browser geolocation) and five-digit ZIP codes from a fixed table. Unknown
/// ZIPs fall back to the configured location when one is set.
#[derive(Debug, Clone)]
pub struct StaticAddressResolver {
    zip_codes: HashMap<String, Coordinate>,
    fallback: Option<Coordinate>,
}

const SERVICE_AREA_ZIPS: [(&str, f64, f64); 6] = [
    ("10007", 40.7128, -74.0060),
    ("10036", 40.7589, -73.9851),
    ("10024", 40.7831, -73.9712),
    ("10004", 40.6892, -74.0445),
    ("10001", 40.7505, -73.9934),
    ("07302", 40.7282, -74.0776),
];

impl StaticAddressResolver {
    pub fn new(fallback: Option<Coordinate>) -> Self {
        let zip_codes = SERVICE_AREA_ZIPS
            .iter()
            .map(|(zip, lat, lng)| (zip.to_string(), Coordinate::trusted(*lat, *lng)))
            .collect();

        Self {
            zip_codes,
            fallback,
        }
    }

    pub fn with_zip(mut self, zip: impl Into<String>, location: Coordinate) -> Self {
        self.zip_codes.insert(zip.into(), location);
        self
    }
}

impl Default for StaticAddressResolver {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AddressResolver for StaticAddressResolver {
    fn resolve(&self, text: &str) -> Result<Coordinate, LocatorError> {
        let trimmed = text.trim();

        if let Some(pair) = parse_coordinate_pair(trimmed) {
            return pair;
        }

        if is_zip_code(trimmed) {
            if let Some(location) = self.zip_codes.get(trimmed) {
                return Ok(*location);
            }
            if let Some(fallback) = self.fallback {
                return Ok(fallback);
            }
        }

        warn!(address = %trimmed, "address could not be resolved");
        Err(LocatorError::AddressNotResolved(trimmed.to_string()))
    }
}

/// Parses `"lat, lng"`. Returns `None` when the text is not a numeric pair
/// at all, and an error when it is one but out of range.
fn parse_coordinate_pair(text: &str) -> Option<Result<Coordinate, LocatorError>> {
    let (lat, lng) = text.split_once(',')?;
    let latitude = lat.trim().parse::<f64>().ok()?;
    let longitude = lng.trim().parse::<f64>().ok()?;
    Some(Coordinate::new(latitude, longitude))
}

fn is_zip_code(text: &str) -> bool {
    text.len() == 5 && text.bytes().all(|b| b.is_ascii_digit())
}

/// Where the caller is, as supplied in a request: explicit coordinates or an
/// address to resolve.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObserverQuery {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub address: Option<String>,
}

impl ObserverQuery {
    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            address: None,
        }
    }

    pub fn address(text: impl Into<String>) -> Self {
        Self {
            latitude: None,
            longitude: None,
            address: Some(text.into()),
        }
    }

    /// Explicit coordinates win over the address.
    pub fn locate(&self, resolver: &dyn AddressResolver) -> Result<Coordinate, LocatorError> {
        match (self.latitude, self.longitude, self.address.as_deref()) {
            (Some(latitude), Some(longitude), _) => Coordinate::new(latitude, longitude),
            (_, _, Some(address)) if !address.trim().is_empty() => resolver.resolve(address),
            _ => Err(LocatorError::MissingObserver),
        }
    }
}
