//! Recipient tree: organizations with their eligible users nested inside
//!
//! The backend returns organizations and users as flat lists. [`build_organization_tree`]
//! turns them into a forest of [`OrganizationItem`]s; the helpers here walk that
//! forest for rendering and for expanding selections into user ids.

mod builder;

use serde::Serialize;

use crate::client::models::NextNode;
use crate::selection::{NodeKind, SelectionEntry};

pub use builder::build_organization_tree;

/// Whether a role's recipients are users or whole organizations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeMode {
    /// Only organizations that contain eligible users are kept
    #[default]
    User,
    /// Every organization is kept and is itself selectable
    Org,
}

impl TreeMode {
    /// Mode implied by a workflow node
    pub fn for_role(node: &NextNode) -> Self {
        if node.org_level {
            TreeMode::Org
        } else {
            TreeMode::User
        }
    }
}

/// A node of the recipient tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum OrganizationItem {
    #[serde(rename = "Org")]
    Org(OrgItem),
    #[serde(rename = "User")]
    Person(PersonItem),
}

/// Organization node with its nested members and sub-units
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgItem {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    /// Depth from the root of its tree (root = 0)
    pub level: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leader_name: Option<String>,
    /// Person children first, then sub-organizations
    pub children: Vec<OrganizationItem>,
}

impl Drop for OrgItem {
    // Iterative, so long parent chains do not overflow the stack.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut item) = pending.pop() {
            if let OrganizationItem::Org(org) = &mut item {
                pending.append(&mut org.children);
            }
        }
    }
}

/// User leaf
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonItem {
    pub id: u64,
    pub name: String,
    pub org_id: u64,
    pub is_leader: bool,
    pub level: usize,
}

impl OrganizationItem {
    pub fn id(&self) -> u64 {
        match self {
            OrganizationItem::Org(org) => org.id,
            OrganizationItem::Person(person) => person.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            OrganizationItem::Org(org) => &org.name,
            OrganizationItem::Person(person) => &person.name,
        }
    }

    pub fn level(&self) -> usize {
        match self {
            OrganizationItem::Org(org) => org.level,
            OrganizationItem::Person(person) => person.level,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            OrganizationItem::Org(_) => NodeKind::Org,
            OrganizationItem::Person(_) => NodeKind::User,
        }
    }

    /// Direct children; always empty for persons
    pub fn children(&self) -> &[OrganizationItem] {
        match self {
            OrganizationItem::Org(org) => &org.children,
            OrganizationItem::Person(_) => &[],
        }
    }

    pub fn as_org(&self) -> Option<&OrgItem> {
        match self {
            OrganizationItem::Org(org) => Some(org),
            OrganizationItem::Person(_) => None,
        }
    }

    pub fn as_person(&self) -> Option<&PersonItem> {
        match self {
            OrganizationItem::Person(person) => Some(person),
            OrganizationItem::Org(_) => None,
        }
    }

    /// Selection entry identifying this node
    pub fn to_entry(&self) -> SelectionEntry {
        SelectionEntry::new(self.kind(), self.id(), self.name())
    }
}

/// Pre-order walk over the whole forest
pub fn flatten(forest: &[OrganizationItem]) -> Vec<&OrganizationItem> {
    let mut out = Vec::new();
    let mut stack: Vec<&OrganizationItem> = forest.iter().rev().collect();

    while let Some(item) = stack.pop() {
        out.push(item);
        stack.extend(item.children().iter().rev());
    }

    out
}

/// Find a node by kind and id
pub fn find(forest: &[OrganizationItem], kind: NodeKind, id: u64) -> Option<&OrganizationItem> {
    flatten(forest)
        .into_iter()
        .find(|item| item.kind() == kind && item.id() == id)
}

/// Ids of every person below `item` (or `item` itself if it is a person),
/// deduplicated, in pre-order
pub fn descendant_person_ids(item: &OrganizationItem) -> Vec<u64> {
    let mut ids = Vec::new();
    for node in flatten(std::slice::from_ref(item)) {
        if let Some(person) = node.as_person() {
            if !ids.contains(&person.id) {
                ids.push(person.id);
            }
        }
    }
    ids
}

/// Number of (organization, person) nodes in the forest
pub fn count_nodes(forest: &[OrganizationItem]) -> (usize, usize) {
    flatten(forest)
        .into_iter()
        .fold((0, 0), |(orgs, people), item| {
            if item.as_org().is_some() {
                (orgs + 1, people)
            } else {
                (orgs, people + 1)
            }
        })
}
