use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("malformed persisted state: {0}")]
    MalformedState(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn already_exists(entity: &str) -> Self { Self::AlreadyExists(format!("{} already exists", entity)) }

    /// Storage-level failure rather than a domain outcome.
    pub fn is_infrastructure(&self) -> bool {
        matches!(self, Self::Persistence(_) | Self::MalformedState(_))
    }
}
