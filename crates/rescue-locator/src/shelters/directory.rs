use super::domain::{Coordinate, LocatorError, ShelterId, ShelterRecord};
use serde::{Deserialize, Deserializer};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Read-only snapshot of every shelter known to the service.
///
/// Cloning is cheap; all clones share the same records, which never change
/// after load.
#[derive(Debug, Clone)]
pub struct ShelterDirectory {
    records: Arc<[ShelterRecord]>,
}

impl ShelterDirectory {
    pub fn new(records: Vec<ShelterRecord>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.id) {
                return Err(DirectoryError::DuplicateId(record.id));
            }
            if record.services.iter().all(|service| service.trim().is_empty()) {
                return Err(DirectoryError::MissingServices(record.id));
            }
            if !(0.0..=5.0).contains(&record.rating) {
                return Err(DirectoryError::InvalidRating {
                    id: record.id,
                    rating: record.rating,
                });
            }
        }

        Ok(Self {
            records: records.into(),
        })
    }

    pub fn empty() -> Self {
        Self {
            records: Arc::from(Vec::new()),
        }
    }

    /// The six shelters served by the public locator page.
    pub fn sample() -> Self {
        Self {
            records: sample_records().into(),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let file = std::fs::File::open(path.as_ref()).map_err(DirectoryError::Io)?;
        Self::from_reader(file)
    }

    /// Load shelters from CSV with headers
    /// `id,name,address,phone,email,website,hours,services,rating,latitude,longitude`.
    /// Services are separated by `;`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DirectoryError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.deserialize::<ShelterRow>() {
            records.push(row?.into_record()?);
        }

        Self::new(records)
    }

    pub fn records(&self) -> &[ShelterRecord] {
        &self.records
    }

    pub fn get(&self, id: ShelterId) -> Option<&ShelterRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("failed to read shelter directory: {0}")]
    Io(#[source] std::io::Error),
    #[error("invalid shelter CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("shelter id {0} appears more than once")]
    DuplicateId(ShelterId),
    #[error("shelter {0} lists no services")]
    MissingServices(ShelterId),
    #[error("shelter {id} has rating {rating}, expected 0 to 5")]
    InvalidRating { id: ShelterId, rating: f32 },
    #[error("shelter {id} has an invalid location: {source}")]
    InvalidLocation {
        id: ShelterId,
        #[source]
        source: LocatorError,
    },
}

#[derive(Debug, Deserialize)]
struct ShelterRow {
    id: u32,
    name: String,
    address: String,
    phone: String,
    email: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    website: Option<String>,
    hours: String,
    services: String,
    rating: f32,
    latitude: f64,
    longitude: f64,
}

impl ShelterRow {
    fn into_record(self) -> Result<ShelterRecord, DirectoryError> {
        let id = ShelterId(self.id);
        let location = Coordinate::new(self.latitude, self.longitude)
            .map_err(|source| DirectoryError::InvalidLocation { id, source })?;
        let services = self
            .services
            .split(';')
            .map(str::trim)
            .filter(|service| !service.is_empty())
            .map(str::to_string)
            .collect();

        Ok(ShelterRecord {
            id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            email: self.email,
            website: self.website,
            hours: self.hours,
            services,
            rating: self.rating,
            location,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

struct SampleShelter {
    id: u32,
    name: &'static str,
    address: &'static str,
    phone: &'static str,
    email: &'static str,
    website: Option<&'static str>,
    hours: &'static str,
    services: [&'static str; 4],
    rating: f32,
    latitude: f64,
    longitude: f64,
}

const SAMPLE_SHELTERS: [SampleShelter; 6] = [
    SampleShelter {
        id: 1,
        name: "City Animal Protection Services",
        address: "123 Main St, Downtown",
        phone: "(555) 123-4567",
        email: "info@cityaps.org",
        website: Some("https://cityaps.org"),
        hours: "Mon-Fri: 9AM-6PM, Sat: 10AM-4PM",
        services: ["Emergency Care", "Adoption", "Spay/Neuter", "Vaccination"],
        rating: 4.5,
        latitude: 40.7128,
        longitude: -74.0060,
    },
    SampleShelter {
        id: 2,
        name: "Humane Society Emergency Response",
        address: "456 Oak Ave, Midtown",
        phone: "(555) 987-6543",
        email: "emergency@humanesociety.org",
        website: Some("https://humanesociety.org"),
        hours: "24/7 Emergency Services",
        services: ["24/7 Emergency", "Rescue", "Rehabilitation", "Foster Care"],
        rating: 4.8,
        latitude: 40.7589,
        longitude: -73.9851,
    },
    SampleShelter {
        id: 3,
        name: "Pet Haven Animal Sanctuary",
        address: "789 Pine Rd, Uptown",
        phone: "(555) 456-7890",
        email: "contact@pethaven.org",
        website: None,
        hours: "Mon-Sun: 8AM-8PM",
        services: ["Boarding", "Grooming", "Training", "Adoption"],
        rating: 4.2,
        latitude: 40.7831,
        longitude: -73.9712,
    },
    SampleShelter {
        id: 4,
        name: "Animal Control & Welfare Department",
        address: "321 Elm St, Southside",
        phone: "(555) 654-3210",
        email: "welfare@animalcontrol.gov",
        website: None,
        hours: "Mon-Fri: 8AM-5PM",
        services: ["Animal Control", "Lost Pet Recovery", "Licensing", "Education"],
        rating: 4.0,
        latitude: 40.6892,
        longitude: -74.0445,
    },
    SampleShelter {
        id: 5,
        name: "Companion Animal Hospital",
        address: "654 Cedar Blvd, Eastside",
        phone: "(555) 321-9876",
        email: "care@companionvet.com",
        website: Some("https://companionvet.com"),
        hours: "Mon-Fri: 7AM-9PM, Weekends: 8AM-6PM",
        services: ["Veterinary Care", "Surgery", "Dental", "Emergency"],
        rating: 4.7,
        latitude: 40.7505,
        longitude: -73.9934,
    },
    SampleShelter {
        id: 6,
        name: "Safe Harbor Animal Rescue",
        address: "987 Maple Dr, Westside",
        phone: "(555) 789-0123",
        email: "rescue@safeharbor.org",
        website: None,
        hours: "Tue-Sun: 11AM-7PM",
        services: ["Rescue", "Adoption", "Volunteer Programs", "Education"],
        rating: 4.3,
        latitude: 40.7282,
        longitude: -74.0776,
    },
];

fn sample_records() -> Vec<ShelterRecord> {
    SAMPLE_SHELTERS
        .iter()
        .map(|sample| ShelterRecord {
            id: ShelterId(sample.id),
            name: sample.name.to_string(),
            address: sample.address.to_string(),
            phone: sample.phone.to_string(),
            email: sample.email.to_string(),
            website: sample.website.map(str::to_string),
            hours: sample.hours.to_string(),
            services: sample.services.iter().map(|s| s.to_string()).collect(),
            rating: sample.rating,
            location: Coordinate::trusted(sample.latitude, sample.longitude),
        })
        .collect()
}
