//! Person models

use serde::{Deserialize, Serialize};

/// A user eligible for a workflow role, attached to one organization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// User ID
    pub id: u64,

    /// Display name
    pub name: String,

    /// Owning organization
    pub org_id: u64,

    /// Whether this user leads their organization
    #[serde(default)]
    pub is_leader: bool,
}

#[cfg(test)]
impl Person {
    pub fn new(id: u64, name: impl Into<String>, org_id: u64, is_leader: bool) -> Self {
        Self {
            id,
            name: name.into(),
            org_id,
            is_leader,
        }
    }
}
