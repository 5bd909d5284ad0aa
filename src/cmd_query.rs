//! Query subcommand handlers for pkgreg.

use tracing::{info, warn};

use pkgreg_config::{Config, ConfigValidator};
use pkgreg_core::PackageRegistry;

use crate::cli::Commands;

/// Handle a subcommand against a registry filled from `config`.
pub(crate) fn handle_command(
    command: Commands,
    registry: &PackageRegistry,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Newest => newest(registry),
        Commands::List { format } => list(registry, &format),
        Commands::Get { version } => get(registry, &version),
        Commands::Check => check(config),
    }
}

/// Print the configuration of the newest version.
fn newest(registry: &PackageRegistry) -> Result<(), Box<dyn std::error::Error>> {
    let entry = registry
        .find_newest_entry()
        .ok_or("No packages registered")?;
    info!("Newest registered version is {}", entry.version);
    println!("{}", entry.configuration);
    Ok(())
}

/// List all registered packages.
fn list(registry: &PackageRegistry, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", render_list(registry, format)?);
    Ok(())
}

fn render_list(
    registry: &PackageRegistry,
    format: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    let entries = registry.entries();

    match format {
        "json" => Ok(serde_json::to_string_pretty(&entries)?),
        "table" => {
            if entries.is_empty() {
                return Ok("No packages registered.".to_string());
            }
            let width = entries
                .iter()
                .map(|e| e.version.len())
                .max()
                .unwrap_or(0)
                .max("VERSION".len());
            let mut lines = vec![format!("{:<width$}  CONFIGURATION", "VERSION")];
            for entry in &entries {
                lines.push(format!("{:<width$}  {}", entry.version, entry.configuration));
            }
            Ok(lines.join("\n"))
        }
        other => Err(format!("Unknown format: {}", other).into()),
    }
}

/// Print the configuration registered for one version.
fn get(registry: &PackageRegistry, version: &str) -> Result<(), Box<dyn std::error::Error>> {
    let configuration = registry
        .get(version)
        .ok_or_else(|| format!("Version not registered: {}", version))?;
    println!("{}", configuration);
    Ok(())
}

/// Validate the manifest and report every finding.
fn check(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let result = ConfigValidator::validate(config);

    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }
    for warning in &result.warnings {
        warn!("{}: {}", warning.path, warning.message);
        println!("warning: {}: {}", warning.path, warning.message);
    }

    result.into_result()?;
    println!("Manifest OK ({} packages)", config.packages.len());
    Ok(())
}
