//! Logout command

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Forget the stored access token, keeping host and preferences
pub fn logout(opts: &GlobalOptions) -> Result<()> {
    let mut config = match Config::load_at(opts.config_ref()) {
        Ok(config) => config,
        Err(_) => {
            println!("{} Not logged in", "○".dimmed());
            return Ok(());
        }
    };

    config.clear_session();
    config.save_at(opts.config_ref())?;

    println!("{} Access token removed", "✓".green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_logout_clears_token_and_keeps_host() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let config = Config {
            api_host: Some("https://oa.example.com".to_string()),
            token: Some("secret".to_string()),
            ..Default::default()
        };
        config.save_to(path.clone()).unwrap();

        let opts = GlobalOptions {
            config: Some(path.to_string_lossy().to_string()),
            ..Default::default()
        };
        logout(&opts).unwrap();

        let reloaded = Config::load_from(path).unwrap();
        assert!(reloaded.token.is_none());
        assert_eq!(reloaded.api_host.as_deref(), Some("https://oa.example.com"));
    }
}
