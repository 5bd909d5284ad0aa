//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Default manifest location, `~/.pkgreg/packages.toml`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".pkgreg"))
            .unwrap_or_else(|| PathBuf::from(".pkgreg"))
            .join("packages.toml")
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.pkgreg`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(config.packages.is_empty());
    }

    #[test]
    fn test_load_packages() {
        let content = r#"
            [[packages]]
            version = "3.4.10"
            classpath = "/opt/zookeeper-3.4.10/*"

            [[packages]]
            version = "3.5.4"
            classpath = "/opt/zookeeper-3.5.4/lib/*"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.packages.len(), 2);
        assert_eq!(config.packages[0].version, "3.4.10");
        assert_eq!(config.packages[1].classpath, "/opt/zookeeper-3.5.4/lib/*");
    }

    #[test]
    fn test_load_logging() {
        let content = r#"
            [logging]
            level = "debug"
            file_dir = "/var/log/pkgreg"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file_dir.as_deref(), Some("/var/log/pkgreg"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[[packages]]").unwrap();
        writeln!(file, "version = \"3.5.4\"").unwrap();
        writeln!(file, "classpath = \"/opt/zk/*\"").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.packages[0].version, "3.5.4");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/packages.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_load_missing_classpath() {
        let content = r#"
            [[packages]]
            version = "3.5.4"
        "#;
        match ConfigLoader::load_str(content) {
            Err(ConfigError::TomlParse(e)) => assert!(e.to_string().contains("classpath")),
            other => panic!("expected TomlParse error, got {:?}", other),
        }
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("PKGREG_TEST_ZK_HOME", "/opt/zk");
        }
        let content = r#"
            [[packages]]
            version = "3.5.4"
            classpath = "${PKGREG_TEST_ZK_HOME}/lib/*"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.packages[0].classpath, "/opt/zk/lib/*");
        unsafe {
            std::env::remove_var("PKGREG_TEST_ZK_HOME");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_PKGREG_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_expand_path_no_tilde() {
        assert_eq!(ConfigLoader::expand_path("/usr/local/lib"), "/usr/local/lib");
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/test");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/test"));
    }

    #[test]
    fn test_default_path() {
        let path = ConfigLoader::default_path();
        assert!(path.ends_with(".pkgreg/packages.toml"));
    }
}
