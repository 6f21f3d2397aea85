//! Emergency Contact Model

use serde::{Deserialize, Serialize};

/// Person to reach during an emergency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub id: String,
    pub name: String,
    pub relationship: String,
    pub phone: String,
    pub is_primary: bool,
}

impl EmergencyContact {
    fn fixture(id: &str, name: &str, relationship: &str, phone: &str, is_primary: bool) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            relationship: relationship.to_string(),
            phone: phone.to_string(),
            is_primary,
        }
    }
}

/// Contacts shown on first launch
pub fn seed_contacts() -> Vec<EmergencyContact> {
    vec![
        EmergencyContact::fixture("1", "Mom", "Mother", "+1 (555) 123-4567", true),
        EmergencyContact::fixture("2", "Dr. Sarah Wilson", "Family Doctor", "+1 (555) 987-6543", false),
        EmergencyContact::fixture("3", "John Smith", "Best Friend", "+1 (555) 456-7890", false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_primary_contact() {
        let contacts = seed_contacts();
        assert_eq!(contacts.iter().filter(|c| c.is_primary).count(), 1);
        assert_eq!(contacts[0].name, "Mom");
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let value = serde_json::to_value(&seed_contacts()[0]).unwrap();
        assert_eq!(value["isPrimary"], true);
    }
}
