//! Transfer/consult submission models

use serde::{Deserialize, Serialize};

/// Which workflow action a submission performs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    /// Hand the item to the next step
    #[default]
    Transfer,
    /// Ask recipients for an opinion without moving the item
    Consult,
}

impl TransferKind {
    /// Path segment used by the backend endpoint
    pub fn path_segment(self) -> &'static str {
        match self {
            TransferKind::Transfer => "transfer",
            TransferKind::Consult => "consult",
        }
    }
}

/// Payload sent when a transfer dialog is submitted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Workflow item being moved
    pub task_id: u64,

    /// Target role/node
    pub role_id: u64,

    pub kind: TransferKind,

    /// Free-text opinion
    pub comment: String,

    /// Main handlers
    pub selected_user_ids: Vec<u64>,

    /// Users copied for information
    #[serde(default)]
    pub to_know_user_ids: Vec<u64>,

    /// Main handler organizations (org-level roles only)
    #[serde(default)]
    pub selected_org_ids: Vec<u64>,

    /// Organizations copied for information (org-level roles only)
    #[serde(default)]
    pub to_know_org_ids: Vec<u64>,
}
