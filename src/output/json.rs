//! JSON output formatting
//!
//! Every JSON result is wrapped as `{ "data": ..., "meta": { timestamp, version } }`.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Envelope for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// RFC 3339 time the output was produced
    pub timestamp: String,

    /// docflow version
    pub version: String,
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }
}

/// Format data as pretty-printed JSON inside the envelope
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::models::{Organization, Person, TransferRequest};
    use crate::tree::{TreeMode, build_organization_tree};

    #[test]
    fn test_envelope_carries_version_and_timestamp() {
        let output = JsonOutput::new(vec![1u64, 2]);

        assert_eq!(output.data, vec![1, 2]);
        assert_eq!(output.meta.version, env!("CARGO_PKG_VERSION"));
        assert!(!output.meta.timestamp.is_empty());
    }

    #[test]
    fn test_format_forest() {
        let forest = build_organization_tree(
            &[Organization::new(1, "Head Office", None)],
            &[Person::new(10, "Li Wei", 1, true)],
            TreeMode::User,
        );

        let value: serde_json::Value =
            serde_json::from_str(&format_json(&forest).unwrap()).unwrap();

        assert_eq!(value["data"][0]["type"], "Org");
        assert_eq!(value["data"][0]["leaderName"], "Li Wei");
        assert_eq!(value["data"][0]["children"][0]["id"], 10);
        assert!(value["meta"]["timestamp"].is_string());
    }

    #[test]
    fn test_format_empty_forest() {
        let forest = build_organization_tree(&[], &[], TreeMode::User);
        let result = format_json(&forest).unwrap();

        assert!(result.contains("\"data\": []"));
    }

    #[test]
    fn test_format_request() {
        let request = TransferRequest {
            task_id: 100,
            role_id: 5,
            selected_user_ids: vec![10],
            ..Default::default()
        };

        let value: serde_json::Value =
            serde_json::from_str(&format_json(&request).unwrap()).unwrap();

        assert_eq!(value["data"]["taskId"], 100);
        assert_eq!(value["data"]["selectedUserIds"][0], 10);
    }
}
