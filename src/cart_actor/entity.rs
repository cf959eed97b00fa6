//! [`RecordEntity`] implementation for [`Cart`].
//!
//! Carts have no unique key besides their id, and deleting a cart that does
//! not exist succeeds.

use super::{CartAction, CartError};
use crate::model::{Cart, CartCreate, CartId, CartItem, CartUpdate};
use record_framework::{DeletePolicy, RecordEntity};

impl RecordEntity for Cart {
    type Id = CartId;
    type Create = CartCreate;
    type Update = CartUpdate;
    type Action = CartAction;
    type ActionResult = Cart;
    type Error = CartError;

    const DELETE_POLICY: DeletePolicy = DeletePolicy::Lenient;

    fn id(&self) -> &CartId {
        &self.id
    }

    fn from_create_params(id: CartId, params: CartCreate) -> Result<Self, CartError> {
        let mut cart = Cart::new(id);
        cart.products = merge_items(params.products)?;
        Ok(cart)
    }

    /// Replaces the item list. Repeated product references are merged.
    fn on_update(&mut self, update: CartUpdate) -> Result<(), CartError> {
        self.products = merge_items(update.products)?;
        Ok(())
    }

    /// Applies the action and returns the cart as it now stands.
    fn handle_action(&mut self, action: CartAction) -> Result<Cart, CartError> {
        match action {
            CartAction::AddProduct { product, quantity } => {
                self.add_product(product, quantity.filter(|q| *q > 0).unwrap_or(1))?;
            }
        }
        Ok(self.clone())
    }
}

fn merge_items(items: Vec<CartItem>) -> Result<Vec<CartItem>, CartError> {
    let mut merged = Cart::new(CartId::new(""));
    for item in items {
        merged.add_product(item.product, item.quantity)?;
    }
    Ok(merged.products)
}
