//! Crisis Resource Model
//!
//! Hotlines and support services listed in the resource directory.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Resource grouping, in display order
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ResourceCategory {
    Emergency,
    MentalHealth,
    Safety,
    Support,
}

impl ResourceCategory {
    /// Section heading for this category
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceCategory::Emergency => "Emergency Services",
            ResourceCategory::MentalHealth => "Mental Health",
            ResourceCategory::Safety => "Personal Safety",
            ResourceCategory::Support => "Support Services",
        }
    }
}

/// One crisis resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub category: ResourceCategory,
}

/// Resources grouped under one category heading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSection {
    pub category: ResourceCategory,
    pub title: String,
    pub resources: Vec<Resource>,
}

fn resource(
    id: &str,
    title: &str,
    subtitle: &str,
    phone: &str,
    website: Option<&str>,
    category: ResourceCategory,
) -> Resource {
    Resource {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        phone: Some(phone.to_string()),
        website: website.map(str::to_string),
        category,
    }
}

/// Built-in resource directory
pub fn seed_resources() -> Vec<Resource> {
    use ResourceCategory::*;

    vec![
        resource("1", "Emergency Services", "911 - Police, Fire, Medical", "911", None, Emergency),
        resource(
            "2",
            "National Suicide Prevention Lifeline",
            "24/7 crisis support",
            "988",
            Some("https://suicidepreventionlifeline.org"),
            MentalHealth,
        ),
        resource(
            "3",
            "Crisis Text Line",
            "Text HOME to 741741",
            "741741",
            Some("https://crisistextline.org"),
            MentalHealth,
        ),
        resource(
            "4",
            "National Domestic Violence Hotline",
            "24/7 confidential support",
            "1-800-799-7233",
            Some("https://thehotline.org"),
            Safety,
        ),
        resource(
            "5",
            "SAMHSA National Helpline",
            "Mental health & substance abuse",
            "1-800-662-4357",
            Some("https://samhsa.gov"),
            MentalHealth,
        ),
        resource(
            "6",
            "National Sexual Assault Hotline",
            "RAINN - 24/7 support",
            "1-800-656-4673",
            Some("https://rainn.org"),
            Support,
        ),
    ]
}
