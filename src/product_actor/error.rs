//! Error types for the Product actor.

use record_framework::{StorageError, StoreError};
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Error)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Another product already uses this code.
    #[error("Product code already in use: {0}")]
    DuplicateCode(String),

    /// The payload was rejected before anything was written.
    #[error("Invalid product: {0}")]
    Validation(String),

    /// The products file could not be written.
    #[error("Product storage error: {0}")]
    Storage(#[from] StorageError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    /// HTTP status a web layer would answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            ProductError::NotFound(_) => 404,
            ProductError::DuplicateCode(_) | ProductError::Validation(_) => 400,
            ProductError::Storage(_) | ProductError::ActorCommunicationError(_) => 500,
        }
    }
}

impl From<StoreError> for ProductError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => ProductError::NotFound(id),
            StoreError::DuplicateKey { value, .. } => ProductError::DuplicateCode(value),
            StoreError::Storage(source) => ProductError::Storage(source),
            StoreError::Entity(source) => match source.downcast::<ProductError>() {
                Ok(product_error) => *product_error,
                Err(other) => ProductError::Validation(other.to_string()),
            },
            e @ (StoreError::ActorClosed
            | StoreError::ActorDropped
            | StoreError::IdExhausted { .. }) => {
                ProductError::ActorCommunicationError(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_product_errors() {
        let e: ProductError = StoreError::NotFound("p9".into()).into();
        assert!(matches!(e, ProductError::NotFound(ref id) if id == "p9"));
        assert_eq!(e.status_code(), 404);

        let e: ProductError = StoreError::DuplicateKey {
            field: "code".into(),
            value: "ABC".into(),
        }
        .into();
        assert!(matches!(e, ProductError::DuplicateCode(ref code) if code == "ABC"));
        assert_eq!(e.status_code(), 400);

        let e: ProductError = StoreError::ActorClosed.into();
        assert_eq!(e.status_code(), 500);
    }

    #[test]
    fn test_entity_error_is_unwrapped() {
        let e: ProductError = StoreError::entity(ProductError::Validation("price".into())).into();
        assert!(matches!(e, ProductError::Validation(ref msg) if msg == "price"));
    }
}
