//! Candidate lists for the role picker.
//!
//! Catalogs are read-only from the core's perspective. When a dataset is
//! loaded, the backend publishes per-role value lists extracted from it;
//! those override the static fallback role by role, never globally. The
//! whole structure is rebuilt when the dataset changes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::role::Role;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Dataset-derived candidate lists keyed by role display name. Empty
    /// when no dataset has been uploaded.
    dynamic: HashMap<String, Vec<String>>,
}

impl Catalog {
    /// Wraps a dataset-derived role map, e.g. the payload of the catalog
    /// endpoint.
    pub fn from_dynamic(dynamic: HashMap<String, Vec<String>>) -> Self {
        Self { dynamic }
    }

    pub fn has_dynamic_entries(&self) -> bool {
        self.dynamic.values().any(|v| !v.is_empty())
    }

    /// Ordered candidate values for `role`. The dataset-derived list wins
    /// when it is non-empty; otherwise the static fallback answers.
    pub fn candidates(&self, role: Role) -> Vec<String> {
        match self.dynamic.get(role.display_name()) {
            Some(values) if !values.is_empty() => values.clone(),
            _ => static_candidates(role),
        }
    }
}

/// Fixed fallback catalog used until a dataset is uploaded.
pub fn static_candidates(role: Role) -> Vec<String> {
    let values: &[&str] = match role {
        Role::BusinessHead => &[
            "Rajesh Kumar",
            "Priya Sharma",
            "Anil Mehta",
            "Sunita Rao",
            "Vikram Nair",
        ],
        Role::GroupBusinessManager => &["Deepak Joshi", "Kavita Iyer", "Rohit Malhotra"],
        Role::ChannelChamp => &["Arjun Reddy", "Meena Pillai", "Sanjay Gupta"],
        Role::GroupChannelChamp => &["Nisha Verma", "Karthik Subramanian"],
        Role::VerticalAccount => &[
            "Banking & Financial Services",
            "Government",
            "Healthcare",
            "IT/ITeS",
            "Manufacturing",
            "Telecom",
        ],
        Role::VerticalChamp => &["Amit Desai", "Lakshmi Menon", "Farhan Ali"],
        Role::RegionalCommercialBusinessManager => &["Suresh Babu", "Pooja Singh", "Manoj Pandey"],
        Role::Year => &["2019", "2020", "2021", "2022", "2023", "2024", "2025"],
        Role::Oem => &[
            "Cisco",
            "Dell EMC",
            "Fortinet",
            "Palo Alto Networks",
            "Trend Micro",
            "Veeam",
        ],
        Role::Partner => &[
            "Accel Solutions",
            "Inflow Technologies",
            "Redington",
            "Savex Technologies",
            "Tech Data",
        ],
        Role::EndCustomer => &[
            "Apex Bank",
            "Medicare Group",
            "National Telecom",
            "Orbit Motors",
            "State Power Grid",
        ],
    };
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog_serves_static_lists() {
        let catalog = Catalog::default();
        assert!(!catalog.has_dynamic_entries());
        assert_eq!(catalog.candidates(Role::Oem), static_candidates(Role::Oem));
        for role in Role::ALL {
            assert!(!catalog.candidates(role).is_empty(), "{role} has no candidates");
        }
    }

    #[test]
    fn dynamic_list_overrides_per_role_only() {
        let mut map = HashMap::new();
        map.insert("OEM".to_string(), vec!["Cisco".to_string(), "Veeam".to_string()]);
        let catalog = Catalog::from_dynamic(map);

        assert_eq!(catalog.candidates(Role::Oem), vec!["Cisco", "Veeam"]);
        // Roles absent from the dataset keep the static fallback.
        assert_eq!(
            catalog.candidates(Role::Partner),
            static_candidates(Role::Partner)
        );
    }

    #[test]
    fn empty_dynamic_list_falls_back() {
        let mut map = HashMap::new();
        map.insert("Partner".to_string(), Vec::new());
        let catalog = Catalog::from_dynamic(map);
        assert_eq!(
            catalog.candidates(Role::Partner),
            static_candidates(Role::Partner)
        );
    }
}
