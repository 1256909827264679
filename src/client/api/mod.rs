//! API trait definitions split by responsibility
//!
//! - [`DirectoryApi`] - Organization and user lookups
//! - [`WorkflowApi`] - Next-step discovery and transfer submission
//!
//! The [`DocflowApi`](super::DocflowApi) super-trait combines both.

mod directory;
mod workflow;

pub use directory::DirectoryApi;
pub use workflow::WorkflowApi;
