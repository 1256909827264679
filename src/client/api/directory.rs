//! Directory API trait for organization and user lookups

use async_trait::async_trait;

use crate::client::models::{Organization, Person};
use crate::error::Result;

/// Read-only organization directory operations
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    /// Fetch every organization unit, flat with parent links.
    async fn fetch_organizations(&self) -> Result<Vec<Organization>>;

    /// Fetch the users eligible for a workflow role.
    ///
    /// Org-level roles usually return an empty list.
    async fn fetch_users_for_role(&self, role_id: u64) -> Result<Vec<Person>>;
}
