//! Transfer command implementation
//!
//! Drives a [`TransferDialog`] from the command line: pick the next step,
//! load and build the recipient tree, apply the selection (flags or prompts),
//! attach a comment, confirm, and submit.

use std::io::IsTerminal;
use std::sync::Arc;

use colored::Colorize;
use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};
use log::{debug, warn};

use crate::cli::{CommandContext, OutputFormat, TransferArgs, progress};
use crate::cli::args::GlobalOptions;
use crate::client::DocflowApi;
use crate::client::models::{NextNode, TransferKind, TransferRequest};
use crate::error::{Error, Result};
use crate::models::SelectionDisplay;
use crate::output::{Formattable, json, tree as tree_output};
use crate::selection::{Classification, NodeKind, SelectionEntry};
use crate::transfer::{COMMENT_MAX_CHARS, DialogPhase, TransferDialog};
use crate::tree::{self, OrganizationItem, TreeMode};

/// Run the transfer command
pub async fn run(opts: &GlobalOptions, args: &TransferArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let interactive = std::io::stdin().is_terminal();
    let confirm = ctx.config.preferences.confirm_submit && !args.yes;

    let retry = |err: &Error| -> Result<bool> {
        if !interactive {
            return Ok(false);
        }
        eprintln!("{} Submit failed: {}", "✗".red(), err);
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Selection and comment were kept. Try again?")
            .default(true)
            .interact()?)
    };

    match execute(Arc::clone(&ctx.client), args, interactive, confirm, retry).await? {
        Some((request, role_name)) => print_result(&request, &role_name, ctx.format),
        None => Ok(()),
    }
}

/// Walk the dialog from role selection to submission.
///
/// Returns the submitted request and the step name, or `None` when the user
/// declined at the confirmation prompt. `retry` is asked after each failed
/// submit whether to send again.
async fn execute<A, R>(
    api: Arc<A>,
    args: &TransferArgs,
    interactive: bool,
    confirm: bool,
    retry: R,
) -> Result<Option<(TransferRequest, String)>>
where
    A: DocflowApi,
    R: FnMut(&Error) -> Result<bool>,
{
    let kind = if args.consult {
        TransferKind::Consult
    } else {
        TransferKind::Transfer
    };

    let spinner = progress::spinner(format!("Loading next steps for task {}...", args.task));
    let nodes = api.list_next_nodes(args.task).await;
    spinner.finish_and_clear();
    let role = pick_role(nodes?, args.task, args.role, interactive)?;

    let (main, to_know) = args.recipients.receivers()?;
    let mut dialog = TransferDialog::new(args.task, kind).with_receivers(main, to_know);
    dialog.select_role(role)?;
    let role_name = dialog.role().map(|r| r.name.clone()).unwrap_or_default();

    let spinner = progress::spinner(format!("Loading recipients for {}...", role_name));
    let loaded = dialog.load(api.as_ref()).await;
    spinner.finish_and_clear();
    loaded?;
    dialog.open()?;

    if let Some(missing) = dialog.unmatched_receivers().first() {
        let what = match missing.kind {
            NodeKind::User => "User",
            NodeKind::Org => "Organization",
        };
        let err = Error::Other(format!(
            "{} {} is not selectable for {}",
            what, missing.id, role_name
        ));
        dialog.cancel()?;
        return Err(err);
    }

    if dialog.tree().is_empty() {
        eprintln!(
            "{} No eligible recipients for {}",
            "⚠".yellow(),
            role_name.bold()
        );
    } else if interactive && (args.recipients.is_empty() || !args.yes) {
        prompt_selection(&mut dialog)?;
    }

    let text = read_comment(args, interactive)?;
    dialog.set_comment(&text)?;
    if dialog.comment().was_truncated() {
        warn!("Comment truncated to {} characters", COMMENT_MAX_CHARS);
        eprintln!(
            "{} Comment truncated to {} characters",
            "⚠".yellow(),
            COMMENT_MAX_CHARS
        );
    }

    let request = dialog.validate()?;
    print_preview(&dialog);

    if confirm {
        if !interactive {
            dialog.cancel()?;
            return Err(Error::Other(
                "Confirmation required; re-run with --yes to submit non-interactively".to_string(),
            ));
        }

        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("{} task {}?", verb(dialog.kind()), dialog.task_id()))
            .default(true)
            .interact()?;

        if !confirmed {
            dialog.cancel()?;
            eprintln!("Cancelled.");
            return Ok(None);
        }
    }

    submit_with_retry(&mut dialog, &api, retry).await?;

    Ok(Some((request, role_name)))
}

/// Submit until the backend accepts or `retry` declines.
///
/// A failed attempt leaves the dialog open with its selection and comment,
/// so every attempt sends the same request. Validation errors are returned
/// at once; resending would fail the same way.
async fn submit_with_retry<A, R>(
    dialog: &mut TransferDialog,
    api: &Arc<A>,
    mut retry: R,
) -> Result<()>
where
    A: DocflowApi,
    R: FnMut(&Error) -> Result<bool>,
{
    loop {
        let client = Arc::clone(api);
        let spinner = progress::spinner("Submitting...");
        let submitted = dialog
            .submit(move |req| async move { client.submit_transfer(&req).await })
            .await;
        spinner.finish_and_clear();

        let err = match submitted {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };

        if err.is_validation() || dialog.phase() != DialogPhase::Open {
            return Err(err);
        }
        if !retry(&err)? {
            dialog.cancel()?;
            return Err(err);
        }
        debug!("Retrying submit for task {}", dialog.task_id());
    }
}

/// Resolve the target step: explicit id, the only candidate, or a prompt
fn pick_role(
    mut nodes: Vec<NextNode>,
    task_id: u64,
    requested: Option<u64>,
    interactive: bool,
) -> Result<NextNode> {
    if let Some(id) = requested {
        return nodes.into_iter().find(|n| n.id == id).ok_or_else(|| {
            Error::Other(format!("Role {} is not a next step of task {}", id, task_id))
        });
    }

    match nodes.len() {
        0 => Err(Error::Other(format!("Task {} has no next steps", task_id))),
        1 => Ok(nodes.remove(0)),
        _ if interactive => {
            let labels: Vec<String> = nodes
                .iter()
                .map(|n| format!("{} (#{})", n.name, n.id))
                .collect();
            let idx = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Next step")
                .items(&labels)
                .default(0)
                .interact()?;
            nodes
                .into_iter()
                .nth(idx)
                .ok_or_else(|| Error::Other("No step selected".to_string()))
        }
        _ => Err(Error::Other(format!(
            "Task {} has {} next steps; choose one with --role",
            task_id,
            nodes.len()
        ))),
    }
}

fn prompt_label(item: &OrganizationItem, mode: TreeMode) -> String {
    let indent = "  ".repeat(item.level());
    match item {
        OrganizationItem::Org(_) if mode == TreeMode::User => {
            format!("{}{} (everyone below)", indent, item.name())
        }
        OrganizationItem::Org(_) => format!("{}{}", indent, item.name()),
        OrganizationItem::Person(p) if p.is_leader => format!("{}★ {}", indent, p.name),
        OrganizationItem::Person(p) => format!("{}{}", indent, p.name),
    }
}

/// Ask for main handlers, then for-information recipients among the rest.
///
/// Receivers already selected (from flags) start out checked.
fn prompt_selection(dialog: &mut TransferDialog) -> Result<()> {
    let mode = dialog.mode();
    let selection = dialog.selection();
    let nodes: Vec<(String, SelectionEntry, bool)> = tree::flatten(dialog.tree())
        .into_iter()
        .map(|item| {
            let entry = item.to_entry();
            let to_know = selection.is_to_know(&entry);
            (prompt_label(item, mode), entry, to_know)
        })
        .collect();
    let main_defaults: Vec<bool> = nodes
        .iter()
        .map(|(_, entry, _)| selection.is_main(entry))
        .collect();

    let labels: Vec<&str> = nodes.iter().map(|(label, _, _)| label.as_str()).collect();
    let main = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Main handlers (space to select, enter to confirm)")
        .items(&labels)
        .defaults(&main_defaults)
        .interact()?;

    dialog.clear_selection()?;
    let mut rest = Vec::new();
    for (idx, (label, entry, to_know)) in nodes.into_iter().enumerate() {
        if main.contains(&idx) {
            dialog.toggle_main(entry)?;
        } else {
            rest.push((label, entry, to_know));
        }
    }

    if rest.is_empty() {
        return Ok(());
    }

    let labels: Vec<&str> = rest.iter().map(|(label, _, _)| label.as_str()).collect();
    let defaults: Vec<bool> = rest.iter().map(|(_, _, to_know)| *to_know).collect();
    let to_know = MultiSelect::with_theme(&ColorfulTheme::default())
        .with_prompt("For information")
        .items(&labels)
        .defaults(&defaults)
        .interact()?;

    for (idx, (_, entry, _)) in rest.into_iter().enumerate() {
        if to_know.contains(&idx) {
            dialog.toggle_to_know(entry)?;
        }
    }

    Ok(())
}

fn read_comment(args: &TransferArgs, interactive: bool) -> Result<String> {
    if let Some(text) = &args.comment {
        return Ok(text.clone());
    }
    if let Some(path) = &args.comment_file {
        debug!("Reading comment from {}", path.display());
        return Ok(std::fs::read_to_string(path)?);
    }
    if interactive {
        let text: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Comment")
            .allow_empty(true)
            .interact_text()?;
        return Ok(text);
    }
    Ok(String::new())
}

fn verb(kind: TransferKind) -> &'static str {
    match kind {
        TransferKind::Transfer => "Transfer",
        TransferKind::Consult => "Send for consultation",
    }
}

/// Show what is about to be submitted on stderr
fn print_preview(dialog: &TransferDialog) {
    if let Some(role) = dialog.role() {
        eprintln!("\n{} {}", "Next step:".bold(), role.name);
    }
    eprintln!(
        "{}",
        tree_output::render_tree(dialog.tree(), dialog.selection())
    );

    let selection = dialog.selection();
    if !selection.is_empty() {
        let rows: Vec<SelectionDisplay> = selection
            .main()
            .iter()
            .map(|e| SelectionDisplay::new(Classification::Main, e))
            .chain(
                selection
                    .to_know()
                    .iter()
                    .map(|e| SelectionDisplay::new(Classification::ToKnow, e)),
            )
            .collect();
        if let Ok(table) = rows.format(OutputFormat::Table) {
            eprintln!("\n{} ({})\n{}", "Recipients".bold(), selection.len(), table);
        }
    }

    if !dialog.comment().as_str().is_empty() {
        eprintln!(
            "{} {} ({} chars)",
            "Comment:".bold(),
            dialog.comment().as_str(),
            dialog.comment().char_count()
        );
    }
    eprintln!();
}

fn print_result(request: &TransferRequest, role_name: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", json::format_json(request)?),
        _ => {
            let done = match request.kind {
                TransferKind::Transfer => "transferred to",
                TransferKind::Consult => "sent for consultation to",
            };
            eprintln!(
                "{} Task {} {} {}",
                "✓".green(),
                request.task_id,
                done,
                role_name.bold()
            );
        }
    }
    Ok(())
}
