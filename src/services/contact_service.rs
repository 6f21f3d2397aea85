//! Contact Service
//!
//! Emergency contact list. Calling and messaging are placeholders: they log
//! the request and confirm it to the user.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::logging;
use crate::models::emergency_contact::{self, EmergencyContact};
use crate::models::notification::{Notification, NotificationKind};
use crate::services::directory_error::DirectoryError;
use crate::services::notification_sink::{self, NotificationSink};

#[derive(Clone)]
pub struct ContactService {
    contacts: Arc<RwLock<Vec<EmergencyContact>>>,
    sink: Arc<dyn NotificationSink>,
}

impl ContactService {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self::with_contacts(emergency_contact::seed_contacts(), sink)
    }

    pub fn with_contacts(contacts: Vec<EmergencyContact>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            contacts: Arc::new(RwLock::new(contacts)),
            sink,
        }
    }

    pub async fn list(&self) -> Vec<EmergencyContact> {
        self.contacts.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Result<EmergencyContact, DirectoryError> {
        self.contacts
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| DirectoryError::contact_not_found(id))
    }

    /// Remove a contact by id
    pub async fn remove(&self, id: &str) -> Result<EmergencyContact, DirectoryError> {
        let removed = {
            let mut contacts = self.contacts.write().await;
            let index = contacts
                .iter()
                .position(|c| c.id == id)
                .ok_or_else(|| DirectoryError::contact_not_found(id))?;
            contacts.remove(index)
        };

        tracing::info!(contact_id = %removed.id, "Emergency contact removed");
        self.notify(
            NotificationKind::ContactRemoved,
            format!("{} was removed from emergency contacts.", removed.name),
        );

        Ok(removed)
    }

    pub async fn call(&self, id: &str) -> Result<EmergencyContact, DirectoryError> {
        let contact = self.get(id).await?;
        logging::log_placeholder_action("call", &contact.phone);
        self.notify(
            NotificationKind::ContactCall,
            format!("Calling {} at {}", contact.name, contact.phone),
        );
        Ok(contact)
    }

    pub async fn message(&self, id: &str) -> Result<EmergencyContact, DirectoryError> {
        let contact = self.get(id).await?;
        logging::log_placeholder_action("message", &contact.phone);
        self.notify(
            NotificationKind::ContactMessage,
            format!("Emergency message sent to {}.", contact.name),
        );
        Ok(contact)
    }

    fn notify(&self, kind: NotificationKind, body: String) {
        notification_sink::deliver(self.sink.as_ref(), &Notification::new(kind, body));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::notification_sink::RecordingNotificationSink;

    fn service() -> (ContactService, RecordingNotificationSink) {
        let sink = RecordingNotificationSink::new();
        (ContactService::new(Arc::new(sink.clone())), sink)
    }

    #[tokio::test]
    async fn test_remove_contact() {
        let (service, sink) = service();

        let removed = service.remove("2").await.unwrap();
        assert_eq!(removed.name, "Dr. Sarah Wilson");

        let ids: Vec<_> = service.list().await.into_iter().map(|c| c.id).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(sink.titles(), vec!["Contact Removed"]);
    }

    #[tokio::test]
    async fn test_remove_unknown_contact() {
        let (service, sink) = service();

        let err = service.remove("42").await.unwrap_err();
        assert_eq!(err, DirectoryError::contact_not_found("42"));
        assert_eq!(service.list().await.len(), 3);
        assert_eq!(sink.count(), 0);
    }

    #[tokio::test]
    async fn test_call_and_message() {
        let (service, sink) = service();

        service.call("1").await.unwrap();
        service.message("3").await.unwrap();

        let bodies: Vec<_> = sink.notifications().into_iter().map(|n| n.body).collect();
        assert_eq!(
            bodies,
            vec![
                "Calling Mom at +1 (555) 123-4567",
                "Emergency message sent to John Smith.",
            ]
        );
    }
}
