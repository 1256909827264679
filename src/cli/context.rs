//! Command execution context
//!
//! Provides a unified context for command execution: config loading, token
//! validation, and client initialization happen once, here, instead of in
//! every command.

use std::sync::Arc;

use log::debug;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::DocflowClient;
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// Authenticated API client (Arc-wrapped so submit closures can own a handle)
    pub client: Arc<DocflowClient>,
    /// Resolved output format
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns error if config cannot be loaded or no token is configured.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?;
        config.validate_auth()?;

        let host = config.resolve_api_host(opts.api_host_ref());
        debug!("Using backend {}", host);

        let token = config.token.clone().unwrap_or_default();
        let client = Arc::new(DocflowClient::new(&host, token)?);
        let format = resolve_format(opts.format, &config);

        Ok(Self {
            config,
            client,
            format,
        })
    }
}

/// Flag/env first, then the config preference, then pretty
pub fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.or_else(|| {
        config
            .preferences
            .format
            .as_deref()
            .and_then(OutputFormat::from_preference)
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_format_precedence() {
        let mut config = Config::default();
        assert_eq!(resolve_format(None, &config), OutputFormat::Pretty);

        config.preferences.format = Some("table".to_string());
        assert_eq!(resolve_format(None, &config), OutputFormat::Table);
        assert_eq!(
            resolve_format(Some(OutputFormat::Json), &config),
            OutputFormat::Json
        );
    }

    #[test]
    fn test_context_requires_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        Config::default().save_to(path.clone()).unwrap();

        let opts = GlobalOptions {
            config: Some(path.to_string_lossy().to_string()),
            ..Default::default()
        };

        let err = CommandContext::new(&opts).err().unwrap();
        assert!(err.to_string().contains("docflow init"));
    }

    #[test]
    fn test_context_builds_client() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let config = Config {
            token: Some("abc".to_string()),
            ..Default::default()
        };
        config.save_to(path.clone()).unwrap();

        let opts = GlobalOptions {
            config: Some(path.to_string_lossy().to_string()),
            format: Some(OutputFormat::Table),
            api_host: Some("http://127.0.0.1:1".to_string()),
        };

        let ctx = CommandContext::new(&opts).unwrap();
        assert_eq!(ctx.format, OutputFormat::Table);
    }
}
