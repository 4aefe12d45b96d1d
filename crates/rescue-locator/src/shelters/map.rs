use super::domain::{Coordinate, RankedShelter};
use tracing::info;

pub const OVERVIEW_ZOOM: u8 = 12;
pub const FOCUS_ZOOM: u8 = 14;

/// Map widget the locator draws on. Rendering lives outside this crate.
pub trait MapView {
    fn center(&mut self, at: Coordinate, zoom: u8);
    fn add_marker(&mut self, at: Coordinate, label: &str);
    fn fly_to(&mut self, at: Coordinate, zoom: u8);
}

/// Map stand-in that records every call in the log.
#[derive(Debug, Default)]
pub struct TracingMapView;

impl MapView for TracingMapView {
    fn center(&mut self, at: Coordinate, zoom: u8) {
        info!(%at, zoom, "map centered");
    }

    fn add_marker(&mut self, at: Coordinate, label: &str) {
        info!(%at, label, "map marker added");
    }

    fn fly_to(&mut self, at: Coordinate, zoom: u8) {
        info!(%at, zoom, "map flying to location");
    }
}

/// Center on the observer, mark every shelter, then focus the nearest one.
pub fn plot_ranking(map: &mut dyn MapView, observer: Coordinate, ranked: &[RankedShelter]) {
    map.center(observer, OVERVIEW_ZOOM);
    for entry in ranked {
        let label = format!("{} ({})", entry.shelter.name, entry.distance_label());
        map.add_marker(entry.shelter.location, &label);
    }
    if let Some(nearest) = ranked.first() {
        map.fly_to(nearest.shelter.location, FOCUS_ZOOM);
    }
}
