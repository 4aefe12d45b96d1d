use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use tracing::info;

use super::domain::{
    AbuseReportSubmission, AttachmentDescriptor, ConnectedShelter, DropReason, DroppedAttachment,
    ReportError, ReportId, ReportReceipt, MAX_ATTACHMENTS, MAX_ATTACHMENT_BYTES,
    REPORT_INTAKE_SERVICES,
};
use crate::shelters::{nearest_eligible, AddressResolver, ObserverQuery, ShelterLocator, ShelterRecord};

static REPORT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_report_id() -> ReportId {
    let id = REPORT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReportId(format!("rpt-{id:06}"))
}

/// True for shelters that handle emergencies, rescues or animal control.
pub fn accepts_abuse_reports(shelter: &ShelterRecord) -> bool {
    REPORT_INTAKE_SERVICES
        .iter()
        .any(|service| shelter.offers(service))
}

/// Validates abuse reports and routes each one to the nearest shelter able to
/// respond.
pub struct ReportIntakeService<R> {
    locator: ShelterLocator<R>,
}

impl<R> ReportIntakeService<R>
where
    R: AddressResolver + 'static,
{
    pub fn new(locator: ShelterLocator<R>) -> Self {
        Self { locator }
    }

    pub fn submit(
        &self,
        submission: AbuseReportSubmission,
    ) -> Result<ReportReceipt, ReportError> {
        if submission.description.trim().is_empty() {
            return Err(ReportError::MissingDescription);
        }
        if let Some(email) = submission.reporter_email.as_deref() {
            let email = email.trim();
            if !email.is_empty() && !looks_like_email(email) {
                return Err(ReportError::InvalidContactEmail(email.to_string()));
            }
        }

        let query = ObserverQuery {
            latitude: submission.latitude,
            longitude: submission.longitude,
            address: submission.address.clone(),
        };
        let location = self.locator.locate(&query)?;
        let connected = nearest_eligible(
            location,
            self.locator.directory().records(),
            Some(&accepts_abuse_reports),
        )?;

        let (accepted_attachments, dropped_attachments) =
            screen_attachments(submission.attachments);

        let receipt = ReportReceipt {
            report_id: next_report_id(),
            received_at: Utc::now(),
            location,
            connected_shelter: ConnectedShelter::from(connected),
            accepted_attachments,
            dropped_attachments,
        };

        info!(
            report_id = %receipt.report_id.0,
            shelter_id = %receipt.connected_shelter.id,
            attachments = receipt.accepted_attachments.len(),
            "abuse report routed to shelter"
        );
        Ok(receipt)
    }
}

/// Keep images and videos up to the size cap, first five only.
pub fn screen_attachments(
    attachments: Vec<AttachmentDescriptor>,
) -> (Vec<AttachmentDescriptor>, Vec<DroppedAttachment>) {
    let mut accepted = Vec::new();
    let mut dropped = Vec::new();

    for attachment in attachments {
        let reason = if !is_image_or_video(&attachment.content_type) {
            Some(DropReason::UnsupportedType)
        } else if attachment.size_bytes > MAX_ATTACHMENT_BYTES {
            Some(DropReason::TooLarge)
        } else if accepted.len() >= MAX_ATTACHMENTS {
            Some(DropReason::LimitReached)
        } else {
            None
        };

        match reason {
            Some(reason) => dropped.push(DroppedAttachment {
                file_name: attachment.file_name,
                reason,
            }),
            None => accepted.push(attachment),
        }
    }

    (accepted, dropped)
}

fn is_image_or_video(content_type: &str) -> bool {
    content_type
        .trim()
        .parse::<mime::Mime>()
        .map(|parsed| parsed.type_() == mime::IMAGE || parsed.type_() == mime::VIDEO)
        .unwrap_or(false)
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment(name: &str, content_type: &str, size_bytes: u64) -> AttachmentDescriptor {
        AttachmentDescriptor {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            size_bytes,
        }
    }

    #[test]
    fn screening_keeps_media_within_limits() {
        let (accepted, dropped) = screen_attachments(vec![
            attachment("dog.jpg", "image/jpeg", 1024),
            attachment("notes.pdf", "application/pdf", 1024),
            attachment("yard.mp4", "video/mp4", MAX_ATTACHMENT_BYTES),
            attachment("huge.mov", "video/quicktime", MAX_ATTACHMENT_BYTES + 1),
            attachment("weird", "not a mime", 10),
        ]);

        let names: Vec<&str> = accepted.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["dog.jpg", "yard.mp4"]);
        assert_eq!(
            dropped,
            vec![
                DroppedAttachment {
                    file_name: "notes.pdf".to_string(),
                    reason: DropReason::UnsupportedType,
                },
                DroppedAttachment {
                    file_name: "huge.mov".to_string(),
                    reason: DropReason::TooLarge,
                },
                DroppedAttachment {
                    file_name: "weird".to_string(),
                    reason: DropReason::UnsupportedType,
                },
            ]
        );
    }

    #[test]
    fn screening_caps_attachment_count() {
        let photos = (0..7)
            .map(|i| attachment(&format!("photo-{i}.png"), "image/png", 100))
            .collect();
        let (accepted, dropped) = screen_attachments(photos);

        assert_eq!(accepted.len(), MAX_ATTACHMENTS);
        assert_eq!(dropped.len(), 2);
        assert!(dropped
            .iter()
            .all(|entry| entry.reason == DropReason::LimitReached));
        assert_eq!(dropped[0].file_name, "photo-5.png");
    }

    #[test]
    fn email_heuristic() {
        assert!(looks_like_email("reporter@example.org"));
        assert!(!looks_like_email("reporter"));
        assert!(!looks_like_email("@example.org"));
        assert!(!looks_like_email("reporter@localhost"));
    }
}
