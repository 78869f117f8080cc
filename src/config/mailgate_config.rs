//! mailgate configuration file handling
//!
//! Loads and manages the ~/.config/mailgate/config.yaml file.

use crate::mail::EmailConfig;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// mailgate configuration
///
/// Holds default email settings used by `mailgate send` when flags are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailGateConfig {
    /// Default envelope for outgoing email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailConfig>,

    /// tracing filter used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    crate::logging::DEFAULT_FILTER.to_string()
}

impl MailGateConfig {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self {
            email: None,
            log_filter: default_log_filter(),
        }
    }

    /// Create a configuration with default email settings
    pub fn with_email(email: EmailConfig) -> Self {
        Self {
            email: Some(email),
            ..Self::new()
        }
    }

    /// Load configuration from the default path (~/.config/mailgate/config.yaml)
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path();
        Self::load(&path)
    }

    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(crate::MailGateError::ConfigNotFound(path.to_path_buf()));
        }

        tracing::info!(path = %path.display(), "Loading mailgate configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        tracing::debug!(
            has_email = config.email.is_some(),
            log_filter = %config.log_filter,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Saving mailgate configuration");

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Get the default config path (~/.config/mailgate/config.yaml)
    pub fn default_path() -> PathBuf {
        // Always use ~/.config for consistency across platforms (macOS, Linux)
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".config");
        path.push("mailgate");
        path.push("config.yaml");
        path
    }
}

impl Default for MailGateConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn email() -> EmailConfig {
        EmailConfig::new(
            "foo@example.com".parse().unwrap(),
            vec!["bar@example.com".parse().unwrap()],
            "status",
        )
        .unwrap()
    }

    #[test]
    fn test_config_creation() {
        let config = MailGateConfig::new();
        assert!(config.email.is_none());
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = MailGateConfig::with_email(email());
        config.save(&path).unwrap();

        let loaded = MailGateConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.yaml");
        let result = MailGateConfig::load(&path);

        match result {
            Err(crate::MailGateError::ConfigNotFound(missing)) => assert_eq!(missing, path),
            other => panic!("expected missing config, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_yaml_defaults() {
        let yaml = r#"
email:
  from: foo@example.com
  to:
    - bar@example.com
    - baz@example.com
"#;
        let config: MailGateConfig = serde_yaml::from_str(yaml).unwrap();
        let email = config.email.unwrap();
        assert_eq!(email.to.len(), 2);
        assert_eq!(email.subject, "");
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn test_parse_yaml_rejects_bad_address() {
        let yaml = r#"
email:
  from: not-an-address
  to: [bar@example.com]
"#;
        let result: std::result::Result<MailGateConfig, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }
}
