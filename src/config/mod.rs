//! Configuration management for docflow

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Default backend location when neither flag, env, nor config sets one
pub const DEFAULT_API_HOST: &str = "http://localhost:8080";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL (scheme + host, no path)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Bearer token for the workflow backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Ask for confirmation before submitting a transfer
    #[serde(default = "default_confirm_submit")]
    pub confirm_submit: bool,
}

fn default_confirm_submit() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            format: None,
            confirm_submit: default_confirm_submit(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".docflow").join("config.yaml"))
    }

    /// Resolve an optional override into a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from an optional override path
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound.into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to an optional override path
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // Token lives in this file
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Validate that a token is present
    pub fn validate_auth(&self) -> Result<()> {
        match self.token.as_deref() {
            Some(t) if !t.trim().is_empty() => Ok(()),
            _ => Err(ConfigError::MissingToken.into()),
        }
    }

    /// Resolve the backend host: explicit override, then config, then default
    pub fn resolve_api_host(&self, override_host: Option<&str>) -> String {
        override_host
            .map(str::to_string)
            .or_else(|| self.api_host.clone())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// Drop session state at logout
    pub fn clear_session(&mut self) {
        self.token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.api_host.is_none());
        assert!(config.token.is_none());
        assert!(config.preferences.confirm_submit);
    }

    #[test]
    fn test_validate_auth() {
        let mut config = Config::default();
        assert!(config.validate_auth().is_err());

        config.token = Some("   ".to_string());
        assert!(config.validate_auth().is_err());

        config.token = Some("abc".to_string());
        assert!(config.validate_auth().is_ok());
    }

    #[test]
    fn test_resolve_api_host_precedence() {
        let mut config = Config::default();
        assert_eq!(config.resolve_api_host(None), DEFAULT_API_HOST);

        config.api_host = Some("https://oa.example.com/".to_string());
        assert_eq!(config.resolve_api_host(None), "https://oa.example.com");
        assert_eq!(
            config.resolve_api_host(Some("http://127.0.0.1:9000")),
            "http://127.0.0.1:9000"
        );
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = Config {
            api_host: Some("https://oa.example.com".to_string()),
            token: Some("secret".to_string()),
            preferences: Preferences {
                format: Some("json".to_string()),
                confirm_submit: false,
            },
        };
        config.save_to(path.clone()).unwrap();

        let loaded = Config::load_from(path).unwrap();
        assert_eq!(loaded.token.as_deref(), Some("secret"));
        assert_eq!(loaded.preferences.format.as_deref(), Some("json"));
        assert!(!loaded.preferences.confirm_submit);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Config::load_from(dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Config(ConfigError::NotFound)
        ));
    }

    #[test]
    fn test_clear_session() {
        let mut config = Config {
            token: Some("abc".to_string()),
            ..Default::default()
        };
        config.clear_session();
        assert!(config.token.is_none());
    }
}
