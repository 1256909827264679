//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod args;
pub mod context;
pub mod init;
pub mod org;
pub mod progress;
pub mod role;
pub mod session;
pub mod status;
pub mod transfer;

pub use args::{GlobalOptions, OutputFormat, RecipientArgs};
pub use context::CommandContext;

/// docflow - recipient selection and transfer for document workflows
#[derive(Parser, Debug)]
#[command(name = "docflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "DOCFLOW_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "DOCFLOW_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Backend host (e.g. https://oa.example.com)
    #[arg(long, global = true, env = "DOCFLOW_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "DOCFLOW_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure backend host and access token
    Init,

    /// Show configuration status
    Status,

    /// Forget the stored access token
    Logout,

    /// Display version information
    Version,

    /// Browse organizations and recipient trees
    #[command(subcommand)]
    Org(OrgCommands),

    /// Inspect workflow next steps
    #[command(subcommand)]
    Role(RoleCommands),

    /// Transfer a workflow item to the next step
    #[command(after_help = "EXAMPLES:\n  \
            docflow transfer 1001                                # Interactive\n  \
            docflow transfer 1001 --role 5 --main 10 --to-know 12 -c \"Agreed\"\n  \
            docflow transfer 1001 --role 8 --main-org 2,3 --yes  # Org-level step\n  \
            docflow transfer 1001 --consult --role 5 --main 10   # Ask for an opinion")]
    Transfer(TransferArgs),
}

/// Organization subcommands
#[derive(Subcommand, Debug)]
pub enum OrgCommands {
    /// List all organizations (flat)
    List,

    /// Show the recipient tree for a workflow role
    Tree {
        /// Role/node ID whose eligible users are shown
        #[arg(long, short = 'r')]
        role: u64,

        /// Keep every organization (org-level roles)
        #[arg(long)]
        org_level: bool,
    },
}

/// Workflow role subcommands
#[derive(Subcommand, Debug)]
pub enum RoleCommands {
    /// List candidate next steps for a workflow item
    List {
        /// Workflow item (task) ID
        #[arg(long, short = 't')]
        task: u64,
    },
}

/// Arguments for `docflow transfer`
#[derive(Args, Debug, Clone)]
pub struct TransferArgs {
    /// Workflow item (task) ID
    pub task: u64,

    /// Target role/node ID; prompted for when omitted
    #[arg(long, short = 'r')]
    pub role: Option<u64>,

    #[command(flatten)]
    pub recipients: RecipientArgs,

    /// Comment text (cut to 2000 characters)
    #[arg(long, short = 'c', conflicts_with = "comment_file")]
    pub comment: Option<String>,

    /// Read the comment from a file
    #[arg(long)]
    pub comment_file: Option<PathBuf>,

    /// Ask for an opinion instead of transferring
    #[arg(long)]
    pub consult: bool,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_transfer_flags() {
        let cli = Cli::parse_from([
            "docflow", "transfer", "1001", "--role", "5", "--main", "10,11", "-k", "12", "-c",
            "ok", "--yes",
        ]);

        match cli.command {
            Commands::Transfer(args) => {
                assert_eq!(args.task, 1001);
                assert_eq!(args.role, Some(5));
                assert_eq!(args.recipients.main, vec![10, 11]);
                assert_eq!(args.recipients.to_know, vec![12]);
                assert_eq!(args.comment.as_deref(), Some("ok"));
                assert!(args.yes);
                assert!(!args.consult);
            }
            other => panic!("Expected transfer, got {:?}", other),
        }
    }

    #[test]
    fn test_global_format_after_subcommand() {
        let cli = Cli::parse_from(["docflow", "org", "tree", "--role", "5", "--format", "json"]);
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }
}
