//! Organization display model

use serde::Serialize;
use tabled::Tabled;

use crate::client::models::Organization;

/// Organization display model for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct OrgDisplay {
    /// Organization ID
    #[tabled(rename = "ORG ID")]
    pub id: u64,

    /// Organization name
    #[tabled(rename = "NAME")]
    pub name: String,

    /// Parent organization, or "--" for top-level units
    #[tabled(rename = "PARENT")]
    pub parent: String,
}

impl From<Organization> for OrgDisplay {
    fn from(org: Organization) -> Self {
        OrgDisplay::from(&org)
    }
}

impl From<&Organization> for OrgDisplay {
    fn from(org: &Organization) -> Self {
        Self {
            id: org.id,
            name: org.name.clone(),
            parent: org
                .parent_id
                .map(|p| p.to_string())
                .unwrap_or_else(|| "--".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_org_display_from_organization() {
        let display = OrgDisplay::from(Organization::new(2, "Finance", Some(1)));

        assert_eq!(display.id, 2);
        assert_eq!(display.name, "Finance");
        assert_eq!(display.parent, "1");
    }

    #[test]
    fn test_org_display_top_level() {
        let display = OrgDisplay::from(&Organization::new(1, "Head Office", None));
        assert_eq!(display.parent, "--");
    }
}
