//! Workflow API trait for step discovery and transfer submission

use async_trait::async_trait;

use crate::client::models::{NextNode, TransferRequest};
use crate::error::Result;

/// Workflow transition operations
#[async_trait]
pub trait WorkflowApi: Send + Sync {
    /// List the candidate next steps for a workflow item.
    async fn list_next_nodes(&self, task_id: u64) -> Result<Vec<NextNode>>;

    /// Submit a transfer or consult request.
    ///
    /// The endpoint is chosen from `request.kind`.
    async fn submit_transfer(&self, request: &TransferRequest) -> Result<()>;
}
