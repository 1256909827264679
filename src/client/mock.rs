//! Mock workflow API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::{DirectoryApi, WorkflowApi};
use super::models::{NextNode, Organization, Person, TransferRequest};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockWorkflowClient::new()
///     .with_orgs(vec![Organization::new(1, "Head Office", None)])
///     .await;
///
/// let orgs = mock.fetch_organizations().await?;
/// assert_eq!(orgs.len(), 1);
/// ```
#[derive(Default)]
pub struct MockWorkflowClient {
    /// Organizations to return from fetch_organizations
    orgs: Arc<Mutex<Vec<Organization>>>,
    /// Users per role for fetch_users_for_role
    role_users: Arc<Mutex<HashMap<u64, Vec<Person>>>>,
    /// Next nodes to return from list_next_nodes
    next_nodes: Arc<Mutex<Vec<NextNode>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Submitted requests for test assertions
    submitted: Arc<Mutex<Vec<TransferRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub fetch_organizations: usize,
    pub fetch_users_for_role: usize,
    pub list_next_nodes: usize,
    pub submit_transfer: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.fetch_organizations
            + self.fetch_users_for_role
            + self.list_next_nodes
            + self.submit_transfer
    }
}

impl MockWorkflowClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure organizations to return from fetch_organizations.
    pub async fn with_orgs(self, orgs: Vec<Organization>) -> Self {
        *self.orgs.lock().await = orgs;
        self
    }

    /// Configure users returned for a role.
    pub async fn with_role_users(self, role_id: u64, users: Vec<Person>) -> Self {
        self.role_users.lock().await.insert(role_id, users);
        self
    }

    /// Configure next nodes to return from list_next_nodes.
    pub async fn with_next_nodes(self, nodes: Vec<NextNode>) -> Self {
        *self.next_nodes.lock().await = nodes;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        self.fail_next(error).await;
        self
    }

    /// Arm a one-shot error on an existing client.
    pub async fn fail_next(&self, error: ApiError) {
        *self.error.lock().await = Some(error);
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Requests passed to submit_transfer, in call order.
    pub async fn submitted(&self) -> Vec<TransferRequest> {
        self.submitted.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl DirectoryApi for MockWorkflowClient {
    async fn fetch_organizations(&self) -> Result<Vec<Organization>> {
        self.call_count.lock().await.fetch_organizations += 1;
        self.check_error().await?;

        Ok(self.orgs.lock().await.clone())
    }

    async fn fetch_users_for_role(&self, role_id: u64) -> Result<Vec<Person>> {
        self.call_count.lock().await.fetch_users_for_role += 1;
        self.check_error().await?;

        let users = self.role_users.lock().await;
        Ok(users.get(&role_id).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl WorkflowApi for MockWorkflowClient {
    async fn list_next_nodes(&self, _task_id: u64) -> Result<Vec<NextNode>> {
        self.call_count.lock().await.list_next_nodes += 1;
        self.check_error().await?;

        Ok(self.next_nodes.lock().await.clone())
    }

    async fn submit_transfer(&self, request: &TransferRequest) -> Result<()> {
        self.call_count.lock().await.submit_transfer += 1;
        self.check_error().await?;

        self.submitted.lock().await.push(request.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_configured_data() {
        let mock = MockWorkflowClient::new()
            .with_orgs(vec![Organization::new(1, "Head Office", None)])
            .await
            .with_role_users(3, vec![Person::new(10, "Li Wei", 1, true)])
            .await;

        assert_eq!(mock.fetch_organizations().await.unwrap().len(), 1);
        assert_eq!(mock.fetch_users_for_role(3).await.unwrap().len(), 1);
        assert!(mock.fetch_users_for_role(4).await.unwrap().is_empty());

        let counts = mock.call_counts().await;
        assert_eq!(counts.fetch_organizations, 1);
        assert_eq!(counts.fetch_users_for_role, 2);
        assert_eq!(counts.total(), 3);
    }

    #[tokio::test]
    async fn test_mock_error_is_consumed_once() {
        let mock = MockWorkflowClient::new()
            .with_error(ApiError::Network("down".to_string()))
            .await;

        assert!(mock.list_next_nodes(1).await.is_err());
        assert!(mock.list_next_nodes(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_captures_submissions() {
        let mock = MockWorkflowClient::new();
        let request = TransferRequest {
            task_id: 1,
            role_id: 2,
            selected_user_ids: vec![10],
            ..Default::default()
        };

        mock.submit_transfer(&request).await.unwrap();

        assert_eq!(mock.submitted().await, vec![request]);
    }
}
