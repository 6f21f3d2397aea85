//! Errors shared by the list-backed services

/// Directory service errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DirectoryError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Resource {0} has no phone number")]
    MissingPhone(String),

    #[error("Resource {0} has no website")]
    MissingWebsite(String),

    #[error("Unknown resource category: {0}")]
    UnknownCategory(String),
}

impl DirectoryError {
    pub fn contact_not_found(id: &str) -> Self {
        DirectoryError::NotFound {
            kind: "Contact",
            id: id.to_string(),
        }
    }

    pub fn resource_not_found(id: &str) -> Self {
        DirectoryError::NotFound {
            kind: "Resource",
            id: id.to_string(),
        }
    }
}
