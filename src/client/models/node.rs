//! Workflow node (next-step role) models

use serde::{Deserialize, Serialize};

/// Candidate next step of a backend workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextNode {
    /// Node/role ID
    pub id: u64,

    /// Display name
    pub name: String,

    /// Recipients are organizations rather than users
    #[serde(default)]
    pub org_level: bool,
}

#[cfg(test)]
impl NextNode {
    pub fn new(id: u64, name: impl Into<String>, org_level: bool) -> Self {
        Self {
            id,
            name: name.into(),
            org_level,
        }
    }
}
