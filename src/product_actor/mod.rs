//! Product catalog collection: entity rules, errors and actor construction.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use record_framework::{IdGenerator, RecordStorage, StoreActor};

/// Creates a new Product actor and its client.
pub fn new(
    buffer_size: usize,
    storage: impl RecordStorage<Product> + 'static,
    ids: impl IdGenerator + 'static,
) -> (StoreActor<Product>, ProductClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size, storage, ids);
    (actor, ProductClient::new(generic_client))
}
