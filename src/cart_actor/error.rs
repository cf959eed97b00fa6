//! Error types for the Cart actor.

use record_framework::{StorageError, StoreError};
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The requested cart was not found.
    #[error("Cart not found: {0}")]
    NotFound(String),

    /// A quantity was zero or would overflow the line's total.
    #[error("Invalid quantity {quantity} for product {product}")]
    InvalidQuantity { product: String, quantity: u32 },

    /// The carts file could not be written.
    #[error("Cart storage error: {0}")]
    Storage(#[from] StorageError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CartError {
    /// HTTP status a web layer would answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            CartError::NotFound(_) => 404,
            CartError::InvalidQuantity { .. } => 400,
            CartError::Storage(_) | CartError::ActorCommunicationError(_) => 500,
        }
    }
}

impl From<StoreError> for CartError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => CartError::NotFound(id),
            StoreError::Storage(source) => CartError::Storage(source),
            StoreError::Entity(source) => match source.downcast::<CartError>() {
                Ok(cart_error) => *cart_error,
                Err(other) => CartError::ActorCommunicationError(other.to_string()),
            },
            // carts declare no unique key
            e @ (StoreError::DuplicateKey { .. }
            | StoreError::ActorClosed
            | StoreError::ActorDropped
            | StoreError::IdExhausted { .. }) => CartError::ActorCommunicationError(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_cart_errors() {
        let e: CartError = StoreError::NotFound("c1".into()).into();
        assert!(matches!(e, CartError::NotFound(ref id) if id == "c1"));
        assert_eq!(e.status_code(), 404);

        let e: CartError = StoreError::entity(CartError::InvalidQuantity {
            product: "p1".into(),
            quantity: 0,
        })
        .into();
        assert!(matches!(e, CartError::InvalidQuantity { quantity: 0, .. }));
        assert_eq!(e.status_code(), 400);

        let e: CartError = StoreError::ActorDropped.into();
        assert_eq!(e.status_code(), 500);
    }
}
