use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }

    pub fn forbidden(action: &str) -> Self {
        Self::Forbidden(format!("not authorized to {}", action))
    }
}
