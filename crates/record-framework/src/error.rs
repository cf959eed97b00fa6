//! # Store Errors
//!
//! Errors produced by the store actor and its client. Record-specific failures
//! travel inside [`StoreError::Entity`] so client wrappers can downcast them
//! back to their own error type.

use crate::storage::StorageError;

/// Errors that can occur within the record framework itself.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Duplicate {field}: {value}")]
    DuplicateKey { field: String, value: String },
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("No unused id after {attempts} attempts")]
    IdExhausted { attempts: usize },
    #[error("Entity error: {0}")]
    Entity(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn entity(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Entity(Box::new(err))
    }
}
