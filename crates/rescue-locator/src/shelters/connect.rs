use super::domain::{Coordinate, LocatorError, RankedShelter, ShelterRecord};
use super::ranking::rank;
use tracing::info;

/// Caller-supplied test restricting which shelters may be connected.
pub type Eligibility<'a> = &'a dyn Fn(&ShelterRecord) -> bool;

/// Nearest shelter satisfying `eligibility` (or any shelter when `None`).
pub fn connect(
    observer: Coordinate,
    shelters: &[ShelterRecord],
    eligibility: Option<Eligibility<'_>>,
) -> Result<ShelterRecord, LocatorError> {
    nearest_eligible(observer, shelters, eligibility).map(|ranked| ranked.shelter)
}

/// Like [`connect`], but keeps the distance alongside the chosen shelter.
pub fn nearest_eligible(
    observer: Coordinate,
    shelters: &[ShelterRecord],
    eligibility: Option<Eligibility<'_>>,
) -> Result<RankedShelter, LocatorError> {
    let chosen = rank(observer, shelters)
        .into_iter()
        .find(|entry| eligibility.map_or(true, |accepts| accepts(&entry.shelter)))
        .ok_or(LocatorError::NoEligibleShelter)?;

    info!(
        shelter_id = %chosen.shelter.id,
        distance_miles = chosen.distance_miles,
        "connected observer to nearest eligible shelter"
    );
    Ok(chosen)
}
