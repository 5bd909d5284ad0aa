//! Configuration validation.

use std::collections::HashSet;

use crate::error::ConfigError;
use crate::schema::Config;

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error, if any, into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_logging(config, &mut result);
        Self::validate_packages(config, &mut result);
        Self::validate_ordering(config, &mut result);

        result
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if !config.logging.is_known_level() {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', falling back to {}",
                    config.logging.level.trim(),
                    config.logging.filter_directive()
                ),
            ));
        }

        if let Some(dir) = &config.logging.file_dir {
            if dir.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "logging.file_dir",
                    "Log directory must not be empty",
                ));
            }
        }
    }

    fn validate_packages(config: &Config, result: &mut ValidationResult) {
        let mut seen = HashSet::new();

        for (i, package) in config.packages.iter().enumerate() {
            if package.version.is_empty() {
                result.add_error(ValidationError::new(
                    format!("packages[{}].version", i),
                    "Version must not be empty",
                ));
            } else if !seen.insert(package.version.as_str()) {
                result.add_error(ValidationError::new(
                    format!("packages[{}].version", i),
                    format!("Duplicate version '{}'", package.version),
                ));
            }

            if package.classpath.trim().is_empty() {
                result.add_error(ValidationError::new(
                    format!("packages[{}].classpath", i),
                    "Classpath must not be empty",
                ));
            }
        }
    }

    /// Warn when the version picked as newest (plain string ordering) is not
    /// the one with the highest leading number.
    fn validate_ordering(config: &Config, result: &mut ValidationResult) {
        let Some(newest) = config.packages.iter().map(|p| p.version.as_str()).max() else {
            return;
        };
        let Some(newest_major) = leading_number(newest) else {
            return;
        };

        let highest = config
            .packages
            .iter()
            .filter_map(|p| leading_number(&p.version).map(|n| (n, p.version.as_str())))
            .max_by_key(|(n, _)| *n);

        if let Some((major, version)) = highest {
            if major > newest_major {
                result.add_warning(ValidationWarning::new(
                    "packages",
                    format!(
                        "'{}' is treated as newest because versions compare as strings, \
                         although '{}' has a higher leading number",
                        newest, version
                    ),
                ));
            }
        }
    }
}

fn leading_number(version: &str) -> Option<u64> {
    let digits: String = version.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}
