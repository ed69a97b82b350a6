use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum BedrockError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Decode error: {0}")]
    DecodeError(String),
    #[error("AWS error: {0}")]
    AwsError(String),
    #[error("AWS service error: {0}")]
    AwsServiceError(String),
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// How a failure is reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself was unusable; nothing downstream was called.
    Validation,
    /// The model answered, but not with the artifact we expected.
    Decode,
    /// A model, storage or configuration fault.
    Downstream,
}

impl BedrockError {
    pub fn class(&self) -> ErrorClass {
        match self {
            BedrockError::ValidationError(_) => ErrorClass::Validation,
            BedrockError::DecodeError(_) | BedrockError::ResponseError(_) => ErrorClass::Decode,
            BedrockError::ConfigError(_)
            | BedrockError::SerializationError(_)
            | BedrockError::AwsError(_)
            | BedrockError::AwsServiceError(_)
            | BedrockError::StorageError(_) => ErrorClass::Downstream,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.class() {
            ErrorClass::Validation => 400,
            ErrorClass::Decode | ErrorClass::Downstream => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, BedrockError>;
