use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("corrupt data: {0}")]
    CorruptData(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Field constraint violations raised by `models`.
    #[error(transparent)]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn already_exists(entity: &str) -> Self { Self::AlreadyExists(format!("{} already exists", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Model(_) => 1001,
            ServiceError::AlreadyExists(_) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::InvalidArgument(_) => 1004,
            ServiceError::StorageUnavailable(_) => 1201,
            ServiceError::CorruptData(_) => 1202,
        }
    }

    /// Short label used as a metrics dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Model(_) => "validation",
            ServiceError::AlreadyExists(_) => "already_exists",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::InvalidArgument(_) => "invalid_argument",
            ServiceError::StorageUnavailable(_) => "storage_unavailable",
            ServiceError::CorruptData(_) => "corrupt_data",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ServiceError::Model(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn model_errors_surface_as_validation() {
        let err: ServiceError = ModelError::invalid("age", "too old").into();
        assert!(err.is_validation());
        assert_eq!(err.code(), 1001);
        assert_eq!(err.to_string(), "validation error: age: too old");
    }

    #[test]
    fn helper_constructors_format_messages() {
        assert_eq!(ServiceError::not_found("user").to_string(), "not found: user not found");
        assert_eq!(ServiceError::already_exists("user").kind(), "already_exists");
    }
}
