use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::reports::domain::{AbuseReportSubmission, AttachmentDescriptor};
use crate::reports::{report_router, ReportIntakeService};
use crate::shelters::{ShelterDirectory, ShelterLocator, StaticAddressResolver};

pub(super) fn service() -> ReportIntakeService<StaticAddressResolver> {
    service_with(ShelterDirectory::sample())
}

pub(super) fn service_with(
    directory: ShelterDirectory,
) -> ReportIntakeService<StaticAddressResolver> {
    let locator = ShelterLocator::new(directory, Arc::new(StaticAddressResolver::default()));
    ReportIntakeService::new(locator)
}

pub(super) fn submission() -> AbuseReportSubmission {
    AbuseReportSubmission {
        description: "Dog left chained outside without water for two days.".to_string(),
        address: Some("40.783100, -73.971200".to_string()),
        latitude: None,
        longitude: None,
        reporter_name: Some("Concerned Neighbor".to_string()),
        reporter_email: Some("neighbor@example.org".to_string()),
        attachments: vec![
            AttachmentDescriptor {
                file_name: "yard.jpg".to_string(),
                content_type: "image/jpeg".to_string(),
                size_bytes: 2_400_000,
            },
            AttachmentDescriptor {
                file_name: "statement.docx".to_string(),
                content_type:
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                        .to_string(),
                size_bytes: 40_000,
            },
        ],
    }
}

pub(super) fn router() -> axum::Router {
    report_router(Arc::new(service()))
}

pub(super) fn empty_router() -> axum::Router {
    report_router(Arc::new(service_with(ShelterDirectory::empty())))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
