//! Filling a registry from the package manifest.

use std::path::Path;

use tracing::{info, warn};

use pkgreg_config::{Config, ConfigLoader, PackageConfig};
use pkgreg_core::{PackageRegistry, Registration};

/// Load the manifest at `path`.
pub(crate) fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let config = ConfigLoader::load(path)?;
    Ok(config)
}

/// Register every package in manifest order.
///
/// Rejected entries are logged and skipped; the rest are still registered.
pub(crate) fn register_packages(
    registry: &PackageRegistry,
    packages: &[PackageConfig],
) -> Vec<Registration> {
    let mut registrations = Vec::with_capacity(packages.len());

    for package in packages {
        match registry.register(package.version.as_str(), package.classpath.as_str()) {
            Ok(registration) => registrations.push(registration),
            Err(e) => warn!("Skipping package: {}", e),
        }
    }

    info!(
        "Registered {} of {} packages",
        registrations.len(),
        packages.len()
    );
    registrations
}
