use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("corrupt store file: {0}")]
    Corrupt(String),
    #[error("encode error: {0}")]
    Encode(String),
}

impl ServiceError {
    pub fn empty_key(entity: &str) -> Self { Self::Validation(format!("{} id must not be empty", entity)) }
}
