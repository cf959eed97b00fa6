//! Shopping cart collection: merge rules, errors and actor construction.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CartClient;
use crate::model::Cart;
use record_framework::{IdGenerator, RecordStorage, StoreActor};

/// Creates a new Cart actor and its client.
pub fn new(
    buffer_size: usize,
    storage: impl RecordStorage<Cart> + 'static,
    ids: impl IdGenerator + 'static,
) -> (StoreActor<Cart>, CartClient) {
    let (actor, generic_client) = StoreActor::new(buffer_size, storage, ids);
    (actor, CartClient::new(generic_client))
}
