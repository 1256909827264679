//! Workflow next-node display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::NextNode;

/// Next-step candidate for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct NextNodeDisplay {
    #[tabled(rename = "ROLE ID")]
    pub id: u64,

    #[tabled(rename = "NAME")]
    pub name: String,

    /// "users" or "organizations"
    #[tabled(rename = "RECIPIENTS")]
    pub recipients: String,
}

impl From<NextNode> for NextNodeDisplay {
    fn from(node: NextNode) -> Self {
        Self {
            id: node.id,
            recipients: if node.org_level {
                "organizations".to_string()
            } else {
                "users".to_string()
            },
            name: node.name,
        }
    }
}
