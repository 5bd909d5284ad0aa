//! Registry errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The version identifier is already present. The registry is left untouched.
    #[error("Package version already registered: {0}")]
    DuplicateVersion(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_version_error() {
        let err = RegistryError::DuplicateVersion("3.5.4".to_string());
        let display = err.to_string();
        assert!(display.contains("already registered"));
        assert!(display.contains("3.5.4"));
    }

    #[test]
    fn test_error_debug() {
        let err = RegistryError::DuplicateVersion("v1".to_string());
        let debug = format!("{:?}", err);
        assert!(debug.contains("DuplicateVersion"));
    }
}
