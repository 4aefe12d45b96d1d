//! Abuse-report intake: validation, attachment screening and routing to the
//! nearest shelter that handles emergencies.

pub mod domain;
mod intake;
pub mod router;

#[cfg(test)]
mod tests;

pub use domain::{
    AbuseReportSubmission, AttachmentDescriptor, ConnectedShelter, DropReason, DroppedAttachment,
    ReportError, ReportId, ReportReceipt, MAX_ATTACHMENTS, MAX_ATTACHMENT_BYTES,
};
pub use intake::{accepts_abuse_reports, screen_attachments, ReportIntakeService};
pub use router::report_router;
