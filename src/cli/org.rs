//! Organization command implementations

use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat, progress};
use crate::client::DirectoryApi;
use crate::error::Result;
use crate::models::{OrgDisplay, RecipientRowDisplay};
use crate::output::{Formattable, json, tree as tree_output};
use crate::selection::SelectionState;
use crate::tree::{self, TreeMode, build_organization_tree};

/// Run the org list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let orgs = ctx.client.fetch_organizations().await?;
    debug!("Fetched {} organizations", orgs.len());

    let display: Vec<OrgDisplay> = orgs.iter().map(OrgDisplay::from).collect();
    display.print(ctx.format)
}

/// Run the org tree command
pub async fn tree(opts: &GlobalOptions, role_id: u64, org_level: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mode = if org_level { TreeMode::Org } else { TreeMode::User };

    let spinner = progress::spinner(format!("Loading recipients for role {}...", role_id));
    let fetched = futures::try_join!(
        ctx.client.fetch_organizations(),
        ctx.client.fetch_users_for_role(role_id)
    );
    spinner.finish_and_clear();
    let (orgs, users) = fetched?;

    let forest = build_organization_tree(&orgs, &users, mode);
    let (org_count, person_count) = tree::count_nodes(&forest);
    debug!(
        "Recipient tree for role {}: {} organizations, {} users",
        role_id, org_count, person_count
    );

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&forest)?),
        OutputFormat::Table => {
            let rows: Vec<RecipientRowDisplay> = tree::flatten(&forest)
                .into_iter()
                .map(RecipientRowDisplay::from)
                .collect();
            rows.print(OutputFormat::Table)?;
        }
        OutputFormat::Pretty => {
            println!(
                "{}",
                tree_output::render_tree(&forest, &SelectionState::default())
            );
        }
    }

    Ok(())
}
