//! Carts and the merge-or-append rule for their items.

use crate::cart_actor::CartError;
use crate::model::{define_id, ProductId};
use serde::{Deserialize, Serialize};

define_id!(CartId);

/// A quantity of one product held in a cart.
///
/// `product` is a weak reference: the product may have been deleted since.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: ProductId,
    pub quantity: u32,
}

impl CartItem {
    pub fn new(product: impl Into<ProductId>, quantity: u32) -> Self {
        Self {
            product: product.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    #[serde(default)]
    pub products: Vec<CartItem>,
}

/// Payload for creating a cart, optionally pre-filled.
#[derive(Debug, Clone, Default)]
pub struct CartCreate {
    pub products: Vec<CartItem>,
}

/// Replaces a cart's item list. Duplicate product references are merged.
#[derive(Debug, Clone)]
pub struct CartUpdate {
    pub products: Vec<CartItem>,
}

impl Cart {
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            products: Vec::new(),
        }
    }

    /// Adds `quantity` of `product`: an existing line is incremented,
    /// otherwise a new line is appended at the end. Lines never hold zero,
    /// so a zero `quantity` is rejected here.
    pub fn add_product(&mut self, product: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity {
                product: product.to_string(),
                quantity,
            });
        }

        match self.products.iter_mut().find(|item| item.product == product) {
            Some(item) => {
                item.quantity = item.quantity.checked_add(quantity).ok_or_else(|| {
                    CartError::InvalidQuantity {
                        product: product.to_string(),
                        quantity,
                    }
                })?;
            }
            None => self.products.push(CartItem { product, quantity }),
        }
        Ok(())
    }

    /// Quantity held for `product`, zero if absent.
    pub fn quantity_of(&self, product: &ProductId) -> u32 {
        self.products
            .iter()
            .find(|item| &item.product == product)
            .map_or(0, |item| item.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart() -> Cart {
        Cart::new(CartId::new("cart_1"))
    }

    #[test]
    fn test_repeat_add_accumulates() {
        let mut cart = cart();
        cart.add_product("p1".into(), 2).unwrap();
        cart.add_product("p1".into(), 3).unwrap();
        assert_eq!(cart.products, vec![CartItem::new("p1", 5)]);
    }

    #[test]
    fn test_new_products_append_in_order() {
        let mut cart = cart();
        cart.add_product("a".into(), 1).unwrap();
        cart.add_product("b".into(), 1).unwrap();
        cart.add_product("a".into(), 1).unwrap();
        let order: Vec<&str> = cart.products.iter().map(|i| i.product.as_str()).collect();
        assert_eq!(order, ["a", "b"]);
        assert_eq!(cart.quantity_of(&"a".into()), 2);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut cart = cart();
        assert!(matches!(
            cart.add_product("a".into(), 0),
            Err(CartError::InvalidQuantity { quantity: 0, .. })
        ));
        assert!(cart.products.is_empty());
    }

    #[test]
    fn test_overflow_rejected_and_quantity_kept() {
        let mut cart = cart();
        cart.add_product("a".into(), u32::MAX).unwrap();
        assert!(cart.add_product("a".into(), 1).is_err());
        assert_eq!(cart.quantity_of(&"a".into()), u32::MAX);
    }

    #[test]
    fn test_serialized_shape() {
        let mut cart = cart();
        cart.add_product("p1".into(), 2).unwrap();
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "cart_1", "products": [{ "product": "p1", "quantity": 2 }] })
        );
    }
}
