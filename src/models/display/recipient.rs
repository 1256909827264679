//! Recipient tree and selection display models

use serde::Serialize;
use tabled::Tabled;

use crate::selection::{Classification, NodeKind, SelectionEntry};
use crate::tree::OrganizationItem;

fn kind_label(kind: NodeKind) -> String {
    match kind {
        NodeKind::User => "user".to_string(),
        NodeKind::Org => "org".to_string(),
    }
}

/// One row of the flattened recipient tree.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct RecipientRowDisplay {
    #[tabled(rename = "TYPE")]
    pub kind: String,

    #[tabled(rename = "ID")]
    pub id: u64,

    /// Name indented by level
    #[tabled(rename = "NAME")]
    pub name: String,

    #[tabled(rename = "LEVEL")]
    pub level: usize,

    #[tabled(rename = "LEADER")]
    pub leader: String,
}

impl From<&OrganizationItem> for RecipientRowDisplay {
    fn from(item: &OrganizationItem) -> Self {
        let leader = match item {
            OrganizationItem::Org(org) => {
                org.leader_name.clone().unwrap_or_else(|| "--".to_string())
            }
            OrganizationItem::Person(person) if person.is_leader => "yes".to_string(),
            OrganizationItem::Person(_) => "--".to_string(),
        };

        Self {
            kind: kind_label(item.kind()),
            id: item.id(),
            name: format!("{}{}", "  ".repeat(item.level()), item.name()),
            level: item.level(),
            leader,
        }
    }
}

/// A selected recipient for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct SelectionDisplay {
    #[tabled(rename = "AS")]
    pub classification: String,

    #[tabled(rename = "TYPE")]
    pub kind: String,

    #[tabled(rename = "ID")]
    pub id: u64,

    #[tabled(rename = "NAME")]
    pub name: String,
}

impl SelectionDisplay {
    pub fn new(classification: Classification, entry: &SelectionEntry) -> Self {
        Self {
            classification: match classification {
                Classification::Main => "main".to_string(),
                Classification::ToKnow => "for information".to_string(),
            },
            kind: kind_label(entry.kind),
            id: entry.id,
            name: entry.name.clone(),
        }
    }
}
