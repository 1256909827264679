//! Workflow role (next step) commands

use log::debug;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::WorkflowApi;
use crate::error::Result;
use crate::models::NextNodeDisplay;
use crate::output::Formattable;

/// Run the role list command
pub async fn list(opts: &GlobalOptions, task_id: u64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let nodes = ctx.client.list_next_nodes(task_id).await?;
    debug!("Task {} has {} candidate next steps", task_id, nodes.len());

    let display: Vec<NextNodeDisplay> = nodes.into_iter().map(NextNodeDisplay::from).collect();
    display.print(ctx.format)
}
