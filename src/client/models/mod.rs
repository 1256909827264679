//! Workflow backend data models
//!
//! Typed payloads decoded at the network boundary, organized by resource.

mod node;
mod org;
mod transfer;
mod user;

pub use node::NextNode;
pub use org::Organization;
pub use transfer::{TransferKind, TransferRequest};
pub use user::Person;
