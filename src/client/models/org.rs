//! Organization models

use serde::{Deserialize, Serialize};

/// Organization unit as returned by the backend (flat, parent-linked)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Organization ID
    pub id: u64,

    /// Display name
    pub name: String,

    /// Parent organization ID; `None` for top-level units
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
}

#[cfg(test)]
impl Organization {
    pub fn new(id: u64, name: impl Into<String>, parent_id: Option<u64>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
        }
    }
}
