//! Workflow backend API client

#[cfg(test)]
pub mod mock;
pub mod api;
pub mod docflow;
pub mod models;

pub use api::{DirectoryApi, WorkflowApi};
pub use docflow::DocflowClient;
#[cfg(test)]
pub use mock::MockWorkflowClient;

/// Everything the transfer flow needs from the backend
pub trait DocflowApi: DirectoryApi + WorkflowApi {}

impl<T: DirectoryApi + WorkflowApi> DocflowApi for T {}
