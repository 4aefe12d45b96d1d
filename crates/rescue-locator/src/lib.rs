pub mod config;
pub mod error;
pub mod reports;
pub mod shelters;
pub mod telemetry;

use config::DirectoryConfig;
use shelters::{DirectoryError, ShelterDirectory, StaticAddressResolver};
use tracing::info;

/// Load the directory named in `config`, or the built-in sample shelters.
pub fn load_directory(config: &DirectoryConfig) -> Result<ShelterDirectory, DirectoryError> {
    let directory = match &config.csv_path {
        Some(path) => ShelterDirectory::from_path(path)?,
        None => ShelterDirectory::sample(),
    };

    info!(
        shelters = directory.len(),
        source = config
            .csv_path
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_else(|| "built-in sample".to_string()),
        "shelter directory loaded"
    );
    Ok(directory)
}

pub fn address_resolver(config: &DirectoryConfig) -> StaticAddressResolver {
    StaticAddressResolver::new(config.fallback_location)
}
