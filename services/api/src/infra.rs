use metrics_exporter_prometheus::PrometheusHandle;
use rescue_locator::config::DirectoryConfig;
use rescue_locator::error::AppError;
use rescue_locator::reports::AttachmentDescriptor;
use rescue_locator::shelters::{ShelterLocator, StaticAddressResolver};
use rescue_locator::{address_resolver, load_directory};
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_locator(
    config: &DirectoryConfig,
) -> Result<ShelterLocator<StaticAddressResolver>, AppError> {
    let directory = load_directory(config)?;
    let resolver = Arc::new(address_resolver(config));
    Ok(ShelterLocator::new(directory, resolver))
}

/// Describe a local file the way the report form would upload it.
pub(crate) fn attachment_from_path(path: &Path) -> Result<AttachmentDescriptor, AppError> {
    let metadata = std::fs::metadata(path)?;
    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(AttachmentDescriptor {
        file_name,
        content_type,
        size_bytes: metadata.len(),
    })
}
