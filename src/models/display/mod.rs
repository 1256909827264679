//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod node;
mod org;
mod recipient;

pub use node::NextNodeDisplay;
pub use org::OrgDisplay;
pub use recipient::{RecipientRowDisplay, SelectionDisplay};
