//! Pretty rendering of the recipient tree

use colored::Colorize;

use crate::selection::{Classification, SelectionState};
use crate::tree::OrganizationItem;

/// Render the forest as an indented tree, marking selected nodes.
///
/// `[M]` marks main handlers, `[K]` for-information recipients.
pub fn render_tree(forest: &[OrganizationItem], selection: &SelectionState) -> String {
    if forest.is_empty() {
        return "No eligible recipients.".to_string();
    }

    let mut out = String::new();
    for (i, root) in forest.iter().enumerate() {
        render_node(root, "", i + 1 == forest.len(), true, selection, &mut out);
    }
    out.trim_end().to_string()
}

fn render_node(
    item: &OrganizationItem,
    prefix: &str,
    last: bool,
    root: bool,
    selection: &SelectionState,
    out: &mut String,
) {
    let branch = match (root, last) {
        (true, _) => "",
        (false, true) => "└── ",
        (false, false) => "├── ",
    };

    let marker = match selection.classification_of(&item.to_entry()) {
        Some(Classification::Main) => format!("{} ", "[M]".green().bold()),
        Some(Classification::ToKnow) => format!("{} ", "[K]".cyan()),
        None => String::new(),
    };

    let label = match item {
        OrganizationItem::Org(org) => {
            let mut label = format!("{} {}", org.name.bold(), format!("#{}", org.id).dimmed());
            if let Some(leader) = &org.leader_name {
                label.push_str(&format!(" {}", format!("(leader: {})", leader).yellow()));
            }
            label
        }
        OrganizationItem::Person(person) => {
            let star = if person.is_leader { " ★" } else { "" };
            format!("{}{} {}", person.name, star, format!("#{}", person.id).dimmed())
        }
    };

    out.push_str(&format!("{}{}{}{}\n", prefix, branch, marker, label));

    let child_prefix = match (root, last) {
        (true, _) => prefix.to_string(),
        (false, true) => format!("{}    ", prefix),
        (false, false) => format!("{}│   ", prefix),
    };

    let children = item.children();
    for (i, child) in children.iter().enumerate() {
        render_node(
            child,
            &child_prefix,
            i + 1 == children.len(),
            false,
            selection,
            out,
        );
    }
}
