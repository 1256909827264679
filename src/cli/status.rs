//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::context::resolve_format;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "docflow Configuration Status".bold());

    match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            let config_path = Config::resolve_path(opts.config_ref())?;
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();

            if config.validate_auth().is_ok() {
                println!("{} Access token configured", "✓".green());
            } else {
                println!("{} Access token not configured", "✗".red());
                println!("  → Run 'docflow init' to configure");
            }

            let host = config.resolve_api_host(opts.api_host_ref());
            println!("{} Backend host: {}", "○".dimmed(), host.cyan());

            let format = resolve_format(opts.format, &config);
            println!("{} Output format: {:?}", "○".dimmed(), format);

            if config.preferences.confirm_submit {
                println!("{} Confirmation before submit: on", "○".dimmed());
            } else {
                println!(
                    "{} Confirmation before submit: {}",
                    "⚠".yellow(),
                    "off".yellow()
                );
            }

            println!();
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Run {} to create a configuration file.",
                "docflow init".cyan()
            );
            println!();
        }
    }

    Ok(())
}
