//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::{DirectoryApi, DocflowClient};
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for the backend host and an access token, checks the token by
/// fetching the organization list, and writes the config file.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to docflow!".bold().green());
    println!("Let's connect to your workflow backend.\n");

    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();
    let default_host = config.resolve_api_host(opts.api_host_ref());

    let host: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Backend host")
        .default(default_host)
        .interact_text()?;

    let token: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Access token")
        .interact()?;

    println!("\n{}", "Verifying access...".cyan());
    let host = host.trim().trim_end_matches('/').to_string();
    let client = DocflowClient::new(&host, token.clone())?;
    let orgs = client.fetch_organizations().await?;

    println!(
        "{} Connected ({} organizations visible)",
        "✓".green(),
        orgs.len()
    );

    config.api_host = Some(host);
    config.token = Some(token);
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "docflow status".cyan());
    println!(
        "  {} - List next steps of a workflow item",
        "docflow role list --task <ID>".cyan()
    );

    Ok(())
}
