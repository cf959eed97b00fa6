use catalog_cart::clients::ProductClient;
use catalog_cart::config::StoreConfig;
use catalog_cart::lifecycle::{setup_tracing, CatalogSystem};
use catalog_cart::model::{CartCreate, Product, ProductCreate};
use catalog_cart::product_actor::ProductError;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = StoreConfig::from_env()?;
    let system = CatalogSystem::new(&config);

    let params = ProductCreate {
        title: "Yerba Mate".to_string(),
        description: "1kg bag".to_string(),
        code: "YM-1KG".to_string(),
        price: 7.5,
        stock: 40,
        category: "groceries".to_string(),
        status: None,
        thumbnails: Vec::new(),
    };

    let product = ensure_product(&system.product_client, params)
        .instrument(tracing::info_span!("product_setup"))
        .await?;
    info!(product_id = %product.id, "Product ready");

    let cart = system.cart_client.create_cart(CartCreate::default()).await?;
    info!(cart_id = %cart.id, "Cart created");

    let span = tracing::info_span!("cart_filling", cart_id = %cart.id);
    let cart = async {
        system
            .cart_client
            .add_product_to_cart(cart.id.clone(), product.id.clone(), Some(2))
            .await?;
        system
            .cart_client
            .add_product_to_cart(cart.id.clone(), product.id.clone(), None)
            .await
    }
    .instrument(span)
    .await?;
    info!(
        cart_id = %cart.id,
        quantity = cart.quantity_of(&product.id),
        "Cart filled"
    );

    system.shutdown().await?;

    info!("Done");
    Ok(())
}

/// Creates the product, or finds it when a previous run already did.
async fn ensure_product(
    products: &ProductClient,
    params: ProductCreate,
) -> Result<Product, ProductError> {
    match products.create_product(params).await {
        Ok(product) => Ok(product),
        Err(ProductError::DuplicateCode(code)) => {
            warn!(%code, "Product already in catalog");
            products
                .list_products()
                .await?
                .into_iter()
                .find(|p| p.code == code)
                .ok_or(ProductError::NotFound(code))
        }
        Err(e) => Err(e),
    }
}
