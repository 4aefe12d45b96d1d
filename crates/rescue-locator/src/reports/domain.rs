use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shelters::{Coordinate, LocatorError, RankedShelter, ShelterId};

/// Largest attachment accepted with a report.
pub const MAX_ATTACHMENT_BYTES: u64 = 50 * 1024 * 1024;
/// Attachments beyond this many are dropped.
pub const MAX_ATTACHMENTS: usize = 5;

/// Services that mark a shelter as able to take abuse reports.
pub const REPORT_INTAKE_SERVICES: [&str; 3] = ["emergency", "rescue", "animal control"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub String);

/// Abuse report as submitted from the public form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AbuseReportSubmission {
    pub description: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub reporter_name: Option<String>,
    #[serde(default)]
    pub reporter_email: Option<String>,
    #[serde(default)]
    pub attachments: Vec<AttachmentDescriptor>,
}

/// Metadata for a photo or video the reporter attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDescriptor {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    UnsupportedType,
    TooLarge,
    LimitReached,
}

impl DropReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::UnsupportedType => "only images and videos are accepted",
            Self::TooLarge => "file exceeds the 50 MB limit",
            Self::LimitReached => "only the first 5 files are kept",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedAttachment {
    pub file_name: String,
    pub reason: DropReason,
}

/// Contact details of the shelter a report was routed to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectedShelter {
    pub id: ShelterId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub distance_miles: f64,
}

impl From<RankedShelter> for ConnectedShelter {
    fn from(ranked: RankedShelter) -> Self {
        Self {
            id: ranked.shelter.id,
            name: ranked.shelter.name,
            phone: ranked.shelter.phone,
            email: ranked.shelter.email,
            distance_miles: ranked.distance_miles,
        }
    }
}

/// Acknowledgement returned to the reporter. Reports are not stored.
#[derive(Debug, Clone, Serialize)]
pub struct ReportReceipt {
    pub report_id: ReportId,
    pub received_at: DateTime<Utc>,
    pub location: Coordinate,
    pub connected_shelter: ConnectedShelter,
    pub accepted_attachments: Vec<AttachmentDescriptor>,
    pub dropped_attachments: Vec<DroppedAttachment>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReportError {
    #[error("a description of the situation is required")]
    MissingDescription,
    #[error("'{0}' is not a valid contact email")]
    InvalidContactEmail(String),
    #[error(transparent)]
    Locator(#[from] LocatorError),
}
