use std::sync::Arc;

use super::connect::nearest_eligible;
use super::directory::ShelterDirectory;
use super::domain::{Coordinate, LocatorError, RankedShelter, ServiceFilter, ShelterId, ShelterRecord};
use super::ranking::{filter_by_service, rank};
use super::resolver::{AddressResolver, ObserverQuery};

/// Query facade over the directory snapshot and the address resolver.
pub struct ShelterLocator<R> {
    directory: ShelterDirectory,
    resolver: Arc<R>,
}

impl<R> Clone for ShelterLocator<R> {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
            resolver: Arc::clone(&self.resolver),
        }
    }
}

/// Ranked search output together with the resolved observer.
#[derive(Debug, Clone)]
pub struct NearbyShelters {
    pub observer: Coordinate,
    pub filter: ServiceFilter,
    pub results: Vec<RankedShelter>,
}

impl<R> ShelterLocator<R>
where
    R: AddressResolver + 'static,
{
    pub fn new(directory: ShelterDirectory, resolver: Arc<R>) -> Self {
        Self {
            directory,
            resolver,
        }
    }

    pub fn directory(&self) -> &ShelterDirectory {
        &self.directory
    }

    pub fn shelter(&self, id: ShelterId) -> Option<&ShelterRecord> {
        self.directory.get(id)
    }

    pub fn locate(&self, query: &ObserverQuery) -> Result<Coordinate, LocatorError> {
        query.locate(self.resolver.as_ref())
    }

    /// Rank the directory from the caller's location, filter by service and
    /// optionally keep only the first `limit` entries.
    pub fn nearby(
        &self,
        query: &ObserverQuery,
        filter: ServiceFilter,
        limit: Option<usize>,
    ) -> Result<NearbyShelters, LocatorError> {
        let observer = self.locate(query)?;
        let mut results = filter_by_service(rank(observer, self.directory.records()), &filter);
        if let Some(limit) = limit {
            results.truncate(limit);
        }

        Ok(NearbyShelters {
            observer,
            filter,
            results,
        })
    }

    /// Nearest shelter offering `filter`'s service from the caller's location.
    pub fn connect(
        &self,
        query: &ObserverQuery,
        filter: &ServiceFilter,
    ) -> Result<RankedShelter, LocatorError> {
        let observer = self.locate(query)?;
        let accepts = |shelter: &ShelterRecord| filter.matches(shelter);
        nearest_eligible(observer, self.directory.records(), Some(&accepts))
    }
}
