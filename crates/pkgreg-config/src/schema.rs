//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Packages to register, in manifest order.
    #[serde(default)]
    pub packages: Vec<PackageConfig>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set.
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for rolling log files. Console only when unset.
    #[serde(default)]
    pub file_dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            file_dir: None,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

impl LoggingConfig {
    /// Check if `level` is a plain level name or a directive list.
    ///
    /// Directive lists such as `"pkgreg=debug,warn"` are accepted as long as
    /// every directive names a target. A bare unknown word is rejected, since a
    /// filter would read it as a target name and silence everything else.
    pub fn is_known_level(&self) -> bool {
        let level = self.level.trim();
        if level.is_empty() {
            return false;
        }
        level.split(',').all(|directive| {
            let directive = directive.trim();
            match directive.split_once('=') {
                Some((target, level)) => {
                    !target.is_empty()
                        && LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str())
                }
                None => LOG_LEVELS.contains(&directive.to_ascii_lowercase().as_str()),
            }
        })
    }

    /// Filter directive to use when `RUST_LOG` is not set.
    pub fn filter_directive(&self) -> &str {
        if self.is_known_level() {
            self.level.trim()
        } else {
            "info"
        }
    }
}

/// A server package: the version it provides and how to run it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageConfig {
    pub version: String,

    /// Java classpath passed as `-cp` when launching this version.
    pub classpath: String,
}

impl PackageConfig {
    pub fn new(version: impl Into<String>, classpath: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            classpath: classpath.into(),
        }
    }
}
