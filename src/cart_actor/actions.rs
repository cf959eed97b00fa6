//! Custom actions for the Cart actor.

use crate::model::ProductId;

/// Operations on a cart beyond whole-record updates.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds a product to the cart, merging with an existing line for the
    /// same product. A missing or zero quantity counts as one.
    AddProduct {
        product: ProductId,
        quantity: Option<u32>,
    },
}
