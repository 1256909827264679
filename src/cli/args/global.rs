//! Global CLI options shared across all commands
//!
//! This module provides a centralized struct for global CLI options, so command
//! handlers take one argument instead of a growing parameter list.

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// For most options, the precedence is: CLI flag > environment variable > config file > default.
/// This struct captures the CLI/env layer; config file defaults are resolved later in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format override (pretty, table, json)
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.docflow/config.yaml)
    pub config: Option<String>,

    /// Backend host override
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_host: cli.api_host.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get API host override as `Option<&str>`.
    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_options_accessors() {
        let opts = GlobalOptions {
            format: Some(OutputFormat::Json),
            config: Some("/custom/path".to_string()),
            api_host: Some("http://localhost:8080".to_string()),
        };

        assert_eq!(opts.config_ref(), Some("/custom/path"));
        assert_eq!(opts.api_host_ref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_global_options_none_accessors() {
        let opts = GlobalOptions::default();

        assert_eq!(opts.format, None);
        assert_eq!(opts.config_ref(), None);
        assert_eq!(opts.api_host_ref(), None);
    }
}
