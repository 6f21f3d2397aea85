//! User Profile Model

use serde::{Deserialize, Serialize};

/// Personal and medical details shared with responders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub emergency_info: String,
    pub blood_type: String,
    pub notifications_enabled: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "Sarah Johnson".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            email: "sarah.johnson@email.com".to_string(),
            emergency_info: "Type 1 Diabetes, Allergic to Penicillin".to_string(),
            blood_type: "O+".to_string(),
            notifications_enabled: true,
        }
    }
}
