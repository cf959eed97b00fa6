//! # RecordClient Trait
//!
//! Common read/delete surface for record-specific clients, built on top of a
//! generic [`StoreClient`]. Implementors only supply access to the inner
//! client and a mapping from [`StoreError`] to their own error type.
use crate::{RecordEntity, StoreClient, StoreError};
use async_trait::async_trait;

/// Trait for record-specific clients to inherit the standard read operations.
///
/// # Example
///
/// ```rust
/// use record_framework::{RecordClient, RecordEntity, StoreClient, StoreError};
/// use async_trait::async_trait;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Debug, Serialize, Deserialize)]
/// struct Tag { id: String }
/// #[derive(Debug)] struct TagCreate;
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct TagError(String);
///
/// impl RecordEntity for Tag {
///     type Id = String;
///     type Create = TagCreate;
///     type Update = ();
///     type Action = ();
///     type ActionResult = ();
///     type Error = TagError;
///
///     fn id(&self) -> &String { &self.id }
///     fn from_create_params(id: String, _: TagCreate) -> Result<Self, TagError> { Ok(Self { id }) }
///     fn on_update(&mut self, _: ()) -> Result<(), TagError> { Ok(()) }
///     fn handle_action(&mut self, _: ()) -> Result<(), TagError> { Ok(()) }
/// }
///
/// struct TagClient { inner: StoreClient<Tag> }
///
/// #[async_trait]
/// impl RecordClient<Tag> for TagClient {
///     type Error = TagError;
///
///     fn inner(&self) -> &StoreClient<Tag> { &self.inner }
///
///     fn map_error(e: StoreError) -> TagError { TagError(e.to_string()) }
/// }
///
/// async fn usage(client: TagClient) {
///     // list(), get() and delete() are provided
///     let _ = client.list().await;
///     let _ = client.get("tag_1".to_string()).await;
///     let _ = client.delete("tag_1".to_string()).await;
/// }
/// ```
#[async_trait]
pub trait RecordClient<T: RecordEntity>: Send + Sync {
    /// The record-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Map framework errors to the record-specific error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Every record in persisted order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Fetch a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete a record by id, following the record kind's delete policy.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
