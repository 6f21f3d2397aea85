//! Resource Service
//!
//! Read-only crisis resource directory grouped by category.

use std::str::FromStr;
use std::sync::Arc;

use strum::IntoEnumIterator;

use crate::logging;
use crate::models::notification::{Notification, NotificationKind};
use crate::models::resource::{self, Resource, ResourceCategory, ResourceSection};
use crate::services::directory_error::DirectoryError;
use crate::services::notification_sink::{self, NotificationSink};

#[derive(Clone)]
pub struct ResourceService {
    resources: Arc<Vec<Resource>>,
    sink: Arc<dyn NotificationSink>,
}

impl ResourceService {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            resources: Arc::new(resource::seed_resources()),
            sink,
        }
    }

    pub fn list(&self) -> Vec<Resource> {
        self.resources.to_vec()
    }

    /// Resources in one category, by its kebab-case name
    pub fn in_category(&self, category: &str) -> Result<Vec<Resource>, DirectoryError> {
        let category = ResourceCategory::from_str(category)
            .map_err(|_| DirectoryError::UnknownCategory(category.to_string()))?;

        Ok(self
            .resources
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect())
    }

    /// Non-empty sections in display order
    pub fn by_category(&self) -> Vec<ResourceSection> {
        ResourceCategory::iter()
            .map(|category| ResourceSection {
                category,
                title: category.display_name().to_string(),
                resources: self
                    .resources
                    .iter()
                    .filter(|r| r.category == category)
                    .cloned()
                    .collect(),
            })
            .filter(|section| !section.resources.is_empty())
            .collect()
    }

    pub fn get(&self, id: &str) -> Result<Resource, DirectoryError> {
        self.resources
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| DirectoryError::resource_not_found(id))
    }

    pub fn call(&self, id: &str) -> Result<Resource, DirectoryError> {
        let resource = self.get(id)?;
        let phone = resource
            .phone
            .clone()
            .ok_or_else(|| DirectoryError::MissingPhone(resource.id.clone()))?;

        logging::log_placeholder_action("call", &phone);
        notification_sink::deliver(
            self.sink.as_ref(),
            &Notification::new(NotificationKind::ResourceCall, format!("Dialing {phone}")),
        );
        Ok(resource)
    }

    pub fn open_website(&self, id: &str) -> Result<Resource, DirectoryError> {
        let resource = self.get(id)?;
        let website = resource
            .website
            .clone()
            .ok_or_else(|| DirectoryError::MissingWebsite(resource.id.clone()))?;

        logging::log_placeholder_action("open_website", &website);
        notification_sink::deliver(
            self.sink.as_ref(),
            &Notification::new(
                NotificationKind::ResourceWebsite,
                format!("Opening {} website", resource.title),
            ),
        );
        Ok(resource)
    }
}
