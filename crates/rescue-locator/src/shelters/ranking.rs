use super::distance::distance;
use super::domain::{Coordinate, RankedShelter, ServiceFilter, ShelterRecord};
use tracing::debug;

/// Pair every shelter with its distance from `observer`, nearest first.
///
/// Shelters at equal distance keep their directory order.
pub fn rank(observer: Coordinate, shelters: &[ShelterRecord]) -> Vec<RankedShelter> {
    let mut ranked: Vec<RankedShelter> = shelters
        .iter()
        .map(|shelter| RankedShelter {
            distance_miles: distance(observer, shelter.location),
            shelter: shelter.clone(),
        })
        .collect();

    // `sort_by` is stable, which gives the tie-break.
    ranked.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));

    debug!(%observer, shelters = ranked.len(), "ranked shelters by distance");
    ranked
}

/// Keep the ranked entries offering the requested service, preserving order.
pub fn filter_by_service(ranked: Vec<RankedShelter>, filter: &ServiceFilter) -> Vec<RankedShelter> {
    match filter {
        ServiceFilter::All => ranked,
        ServiceFilter::Tag(_) => ranked
            .into_iter()
            .filter(|entry| filter.matches(&entry.shelter))
            .collect(),
    }
}
