use crate::cart_actor;
use crate::clients::{CartClient, ProductClient};
use crate::config::StoreConfig;
use crate::model::{Cart, Product};
use crate::product_actor;
use record_framework::{JsonFileStorage, RecordStorage, UuidGenerator};
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

/// The running product and cart stores.
///
/// # Example
///
/// ```ignore
/// let system = CatalogSystem::new(&StoreConfig::from_env()?);
///
/// let product = system.product_client.create_product(params).await?;
/// let cart = system.cart_client.create_cart(CartCreate::default()).await?;
/// system.cart_client.add_product_to_cart(cart.id, product.id, Some(2)).await?;
///
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    /// Client for the product catalog
    pub product_client: ProductClient,

    /// Client for shopping carts
    pub cart_client: CartClient,

    handles: Vec<JoinHandle<()>>,
}

impl CatalogSystem {
    /// Starts both actors on the JSON files named by `config`.
    ///
    /// Must be called inside a tokio runtime. Missing files are fine: the
    /// collection starts empty and the file is created on the first write.
    pub fn new(config: &StoreConfig) -> Self {
        info!(
            products = %config.products_path().display(),
            carts = %config.carts_path().display(),
            format = ?config.format,
            "Starting catalog system"
        );
        Self::with_storage(
            config.channel_buffer,
            JsonFileStorage::new(config.products_path(), config.format),
            JsonFileStorage::new(config.carts_path(), config.format),
        )
    }

    /// Starts both actors on caller-supplied storage.
    pub fn with_storage(
        buffer_size: usize,
        products: impl RecordStorage<Product> + 'static,
        carts: impl RecordStorage<Cart> + 'static,
    ) -> Self {
        let (product_actor, product_client) =
            product_actor::new(buffer_size, products, UuidGenerator);
        let (cart_actor, cart_client) = cart_actor::new(buffer_size, carts, UuidGenerator);

        let product_handle = tokio::spawn(product_actor.run());
        let cart_handle = tokio::spawn(cart_actor.run());

        Self {
            product_client,
            cart_client,
            handles: vec![product_handle, cart_handle],
        }
    }

    /// Drops the clients and waits for both actors to finish.
    ///
    /// Returns the first join error if an actor task panicked.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        info!("Shutting down catalog system...");

        drop(self.product_client);
        drop(self.cart_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(e);
            }
        }

        info!("Catalog system shutdown complete.");
        Ok(())
    }
}
