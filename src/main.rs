//! pkgreg - server package registry
//!
//! Loads a package manifest into an in-process registry and answers
//! questions about it, such as which classpath runs the newest version.

mod cli;
mod cmd_query;
mod register;

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pkgreg_config::{ConfigLoader, LoggingConfig};
use pkgreg_core::PackageRegistry;

use crate::cli::{Cli, Commands};

/// Initialize tracing with console output and optional rolling file output.
///
/// `RUST_LOG` takes precedence over the configured level; an unknown
/// configured level falls back to `info`.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(logging.filter_directive()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match &logging.file_dir {
        Some(dir) => {
            let log_dir = PathBuf::from(ConfigLoader::expand_path(dir));
            std::fs::create_dir_all(&log_dir)?;

            let file_appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("pkgreg")
                .filename_suffix("log")
                .max_log_files(30)
                .build(&log_dir)?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            // Keeps the background writer alive for the whole run.
            static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
                std::sync::OnceLock::new();
            let _ = GUARD.set(guard);

            Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        // Console goes to stderr so stdout stays scriptable
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(file_layer)
        .init();

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(ConfigLoader::default_path);
    let config = register::load_config(&config_path)?;

    init_tracing(&config.logging)?;
    debug!("Loaded manifest from {}", config_path.display());

    let registry = PackageRegistry::new();
    let _registrations = register::register_packages(&registry, &config.packages);

    let command = cli.command.unwrap_or(Commands::Newest);
    cmd_query::handle_command(command, &registry, &config)
}
