//! # Cart Client
//!
//! High-level API for shopping carts, wrapping a `StoreClient<Cart>`.
use crate::cart_actor::{CartAction, CartError};
use crate::model::{Cart, CartCreate, CartId, CartItem, CartUpdate, ProductId};
use async_trait::async_trait;
use record_framework::{RecordClient, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: StoreClient<Cart>,
}

impl CartClient {
    pub fn new(inner: StoreClient<Cart>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl RecordClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &StoreClient<Cart> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        CartError::from(e)
    }
}

impl CartClient {
    /// Creates a cart, empty unless `params` carries initial items.
    #[instrument(skip(self))]
    pub async fn create_cart(&self, params: CartCreate) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    pub async fn get_cart(&self, id: CartId) -> Result<Cart, CartError> {
        self.get(id).await
    }

    /// The items held in the cart, in the order they were first added.
    pub async fn cart_products(&self, id: CartId) -> Result<Vec<CartItem>, CartError> {
        Ok(self.get(id).await?.products)
    }

    /// Adds `quantity` of a product to the cart and returns the updated cart.
    /// `None` or zero adds one. The product id is not checked against the
    /// catalog.
    #[instrument(skip(self))]
    pub async fn add_product_to_cart(
        &self,
        cart_id: CartId,
        product: ProductId,
        quantity: Option<u32>,
    ) -> Result<Cart, CartError> {
        debug!("Adding product to cart");
        self.inner
            .perform_action(cart_id, CartAction::AddProduct { product, quantity })
            .await
            .map_err(Self::map_error)
    }

    /// Replaces the cart's whole item list.
    #[instrument(skip(self))]
    pub async fn replace_cart_products(
        &self,
        id: CartId,
        products: Vec<CartItem>,
    ) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.inner
            .update(id, CartUpdate { products })
            .await
            .map_err(Self::map_error)
    }

    /// Removes the cart. Removing a cart that does not exist also succeeds.
    pub async fn delete_cart(&self, id: CartId) -> Result<(), CartError> {
        self.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_framework::mock::{create_mock_client, expect_action, MockClient};

    #[tokio::test]
    async fn test_add_product_sends_action() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = CartClient::new(client);

        let task = tokio::spawn(async move {
            cart_client
                .add_product_to_cart("cart_1".into(), "product_1".into(), Some(2))
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id.as_str(), "cart_1");
        let CartAction::AddProduct { product, quantity } = action;
        assert_eq!(product.as_str(), "product_1");
        assert_eq!(quantity, Some(2));

        let mut cart = Cart::new(id);
        cart.products.push(CartItem::new(product, 2));
        responder.send(Ok(cart)).unwrap();

        let cart = task.await.unwrap().unwrap();
        assert_eq!(cart.products, vec![CartItem::new("product_1", 2)]);
    }

    #[tokio::test]
    async fn test_quantity_overflow_surfaces_as_cart_error() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_action("cart_1".into())
            .return_err(StoreError::entity(CartError::InvalidQuantity {
                product: "product_1".into(),
                quantity: u32::MAX,
            }));

        let cart_client = CartClient::new(mock.client());
        let result = cart_client
            .add_product_to_cart("cart_1".into(), "product_1".into(), Some(u32::MAX))
            .await;
        assert_eq!(result.unwrap_err().status_code(), 400);

        mock.verify();
    }

    #[tokio::test]
    async fn test_cart_products_of_missing_cart() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_get("cart_9".into())
            .return_err(StoreError::NotFound("cart_9".into()));

        let cart_client = CartClient::new(mock.client());
        let result = cart_client.cart_products("cart_9".into()).await;
        assert!(matches!(result, Err(CartError::NotFound(id)) if id == "cart_9"));

        mock.verify();
    }
}
