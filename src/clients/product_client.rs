//! # Product Client
//!
//! High-level API for the product catalog. It wraps a `StoreClient<Product>`
//! and exposes domain-specific methods; `list`, `get` and `delete` come from
//! [`RecordClient`].
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::ProductError;
use async_trait::async_trait;
use record_framework::{RecordClient, StoreClient, StoreError};
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: StoreClient<Product>,
}

impl ProductClient {
    pub fn new(inner: StoreClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl RecordClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &StoreClient<Product> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        ProductError::from(e)
    }
}

impl ProductClient {
    /// Adds a product to the catalog and returns it with its new id.
    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Merges the given fields into the product.
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Overwrites every mutable field of the product, keeping its id.
    #[instrument(skip(self))]
    pub async fn replace_product(
        &self,
        id: ProductId,
        params: ProductCreate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .update(id, ProductUpdate::from(params))
            .await
            .map_err(Self::map_error)
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        self.list().await
    }

    pub async fn get_product(&self, id: ProductId) -> Result<Product, ProductError> {
        self.get(id).await
    }

    /// Removes the product. Fails with `NotFound` if there is none.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ProductError> {
        self.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use record_framework::mock::{create_mock_client, expect_create, expect_update, MockClient};

    fn sample(id: &str, code: &str) -> Product {
        Product {
            id: id.into(),
            title: "Lamp".into(),
            description: "Desk lamp".into(),
            code: code.into(),
            price: 30.0,
            status: true,
            stock: 3,
            category: "home".into(),
            thumbnails: Vec::new(),
        }
    }

    fn create_params(code: &str) -> ProductCreate {
        ProductCreate {
            title: "Lamp".into(),
            description: "Desk lamp".into(),
            code: code.into(),
            price: 30.0,
            stock: 3,
            category: "home".into(),
            status: None,
            thumbnails: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_create_product_forwards_params() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task =
            tokio::spawn(async move { product_client.create_product(create_params("L-1")).await });

        let (params, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(params.code, "L-1");
        responder.send(Ok(sample("product_1", "L-1"))).unwrap();

        let created = task.await.unwrap().unwrap();
        assert_eq!(created.id.as_str(), "product_1");
    }

    #[tokio::test]
    async fn test_duplicate_code_maps_to_product_error() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task =
            tokio::spawn(async move { product_client.create_product(create_params("L-1")).await });

        let (_, responder) = expect_create(&mut receiver).await.unwrap();
        responder
            .send(Err(StoreError::DuplicateKey {
                field: "code".into(),
                value: "L-1".into(),
            }))
            .unwrap();

        let result = task.await.unwrap();
        assert!(matches!(result, Err(ProductError::DuplicateCode(code)) if code == "L-1"));
    }

    #[tokio::test]
    async fn test_replace_sends_full_update() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let product_client = ProductClient::new(client);

        let task = tokio::spawn(async move {
            product_client
                .replace_product("product_1".into(), create_params("L-2"))
                .await
        });

        let (id, update, responder) = expect_update(&mut receiver).await.unwrap();
        assert_eq!(id.as_str(), "product_1");
        assert_eq!(update.code.as_deref(), Some("L-2"));
        assert_eq!(update.stock, Some(3));
        assert_eq!(update.status, None);
        responder.send(Ok(sample("product_1", "L-2"))).unwrap();

        assert_eq!(task.await.unwrap().unwrap().code, "L-2");
    }

    #[tokio::test]
    async fn test_get_and_delete_missing_product() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get("product_7".into())
            .return_err(StoreError::NotFound("product_7".into()));
        mock.expect_delete("product_7".into())
            .return_err(StoreError::NotFound("product_7".into()));

        let product_client = ProductClient::new(mock.client());
        let get = product_client.get_product("product_7".into()).await;
        assert!(matches!(get, Err(ProductError::NotFound(_))));
        let delete = product_client.delete_product("product_7".into()).await;
        assert_eq!(delete.unwrap_err().status_code(), 404);

        mock.verify();
    }

    #[tokio::test]
    async fn test_list_products() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_list()
            .return_ok(vec![sample("product_1", "A"), sample("product_2", "B")]);

        let product_client = ProductClient::new(mock.client());
        let products = product_client.list_products().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].code, "B");

        mock.verify();
    }
}
