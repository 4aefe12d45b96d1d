//! Shelter directory and nearest-shelter ranking.
//!
//! Everything here is a pure query over an immutable [`ShelterDirectory`]
//! snapshot: distances are computed per request and never cached, since the
//! observer changes with every caller.

mod connect;
mod directory;
pub mod distance;
pub mod domain;
pub mod map;
pub mod ranking;
pub mod resolver;
pub mod router;
pub mod service;

pub use connect::{connect, nearest_eligible, Eligibility};
pub use directory::{DirectoryError, ShelterDirectory};
pub use distance::{distance, distance_between, EARTH_RADIUS_MILES};
pub use domain::{
    Coordinate, LocatorError, RankedShelter, ServiceFilter, ShelterId, ShelterRecord,
};
pub use map::{plot_ranking, MapView, TracingMapView};
pub use ranking::{filter_by_service, rank};
pub use resolver::{AddressResolver, ObserverQuery, StaticAddressResolver};
pub use router::shelter_router;
pub use service::{NearbyShelters, ShelterLocator};
