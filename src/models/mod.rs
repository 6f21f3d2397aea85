//! Models module for SafeHaven
//!
//! Contains all data models and their validation logic.

pub mod alert_session;
pub mod check_in;
pub mod emergency_contact;
pub mod location;
pub mod notification;
pub mod profile;
pub mod resource;

// Re-export commonly used types
pub use alert_session::{AlertPhase, AlertSession, AlertSessionError, TickOutcome};
pub use check_in::{CheckIn, CheckInSchedule, CheckInStatus};
pub use emergency_contact::EmergencyContact;
pub use location::{LocationFix, LocationStatus, ShareRecipient, ShareStatus};
pub use notification::{Notification, NotificationError, NotificationKind};
pub use profile::UserProfile;
pub use resource::{Resource, ResourceCategory, ResourceSection};
