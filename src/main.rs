//! docflow - recipient selection and transfer for document workflows

use clap::Parser;
use env_logger::Env;

mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;
mod selection;
mod transfer;
mod tree;

use cli::{Cli, Commands, GlobalOptions, OrgCommands, RoleCommands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // RUST_LOG still wins over --debug
    let default_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Logout => cli::session::logout(&opts),
        Commands::Version => {
            println!("docflow version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Org(org_cmd) => match org_cmd {
            OrgCommands::List => cli::org::list(&opts).await,
            OrgCommands::Tree { role, org_level } => cli::org::tree(&opts, role, org_level).await,
        },
        Commands::Role(role_cmd) => match role_cmd {
            RoleCommands::List { task } => cli::role::list(&opts, task).await,
        },
        Commands::Transfer(args) => cli::transfer::run(&opts, &args).await,
    }
}
