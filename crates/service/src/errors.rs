use models::errors::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stored data could not be decoded.
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Model(ModelError::Serialization(_)))
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::NotFound(what) => Self::NotFound(what),
            ModelError::Db(msg) => Self::Db(msg),
            other => Self::Model(other),
        }
    }
}
