//! # Store Actor
//!
//! The `StoreActor` is the server half of a record collection. It owns the
//! collection's [`RecordStorage`] and the receiver end of the request channel,
//! and applies requests one at a time.
//!
//! It keeps no copy of the records between requests: every
//! request starts with `load_all`, so the backing file is the only source of
//! truth, and every mutation ends with a `persist` of the whole collection.

use crate::client::StoreClient;
use crate::entity::{DeletePolicy, RecordEntity};
use crate::error::StoreError;
use crate::id::IdGenerator;
use crate::message::StoreRequest;
use crate::storage::RecordStorage;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Fresh ids drawn per create before giving up.
const MAX_ID_ATTEMPTS: usize = 32;

/// The single writer for one record collection.
///
/// **Concurrency Model**:
/// Requests from any number of cloned clients are queued on one mpsc channel
/// and handled sequentially. Two read-modify-write cycles on the same
/// collection therefore never interleave, which is what keeps whole-file
/// rewrites from losing each other's updates. Separate collections get
/// separate actors and run in parallel.
///
/// # Usage Pattern
///
/// 1. **Create**: `StoreActor::new(buffer, storage, ids)` returns the actor and its client.
/// 2. **Run**: spawn `actor.run()` on the runtime.
/// 3. **Use**: clone the client freely; drop every clone to stop the actor.
pub struct StoreActor<T: RecordEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    storage: Box<dyn RecordStorage<T>>,
    ids: Box<dyn IdGenerator>,
    entity_type: &'static str,
}

impl<T: RecordEntity> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait for
    /// space when it is full.
    pub fn new(
        buffer_size: usize,
        storage: impl RecordStorage<T> + 'static,
        ids: impl IdGenerator + 'static,
    ) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // "Product" instead of "catalog_cart::model::product::Product"
        let entity_type = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            storage: Box::new(storage),
            ids: Box::new(ids),
            entity_type,
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self) {
        let entity_type = self.entity_type;
        info!(entity_type, "Store actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::List { respond_to } => {
                    let records = self.storage.load_all().await;
                    debug!(entity_type, size = records.len(), "List");
                    let _ = respond_to.send(Ok(records));
                }
                StoreRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let _ = respond_to.send(self.create(params).await);
                }
                StoreRequest::Get { id, respond_to } => {
                    let result = self.get(&id).await;
                    debug!(entity_type, %id, found = result.is_ok(), "Get");
                    let _ = respond_to.send(result);
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let _ = respond_to.send(self.update(id, update).await);
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let _ = respond_to.send(self.delete(id).await);
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let _ = respond_to.send(self.action(id, action).await);
                }
            }
        }

        info!(entity_type, "Shutdown");
    }

    async fn create(&mut self, params: T::Create) -> Result<T, StoreError> {
        let entity_type = self.entity_type;
        let mut records = self.storage.load_all().await;

        let id = (0..MAX_ID_ATTEMPTS)
            .map(|_| T::Id::from(self.ids.next_id()))
            .find(|candidate| !records.iter().any(|r| r.id() == candidate))
            .ok_or_else(|| {
                error!(
                    entity_type,
                    attempts = MAX_ID_ATTEMPTS,
                    "Id generator keeps repeating taken ids"
                );
                StoreError::IdExhausted {
                    attempts: MAX_ID_ATTEMPTS,
                }
            })?;

        let record = T::from_create_params(id, params).map_err(|e| {
            warn!(entity_type, error = %e, "Create rejected");
            StoreError::entity(e)
        })?;
        ensure_unique(entity_type, &records, &record)?;

        records.push(record.clone());
        self.persist(&records).await?;
        info!(entity_type, id = %record.id(), size = records.len(), "Created");
        Ok(record)
    }

    async fn get(&self, id: &T::Id) -> Result<T, StoreError> {
        self.storage
            .load_all()
            .await
            .into_iter()
            .find(|r| r.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn update(&mut self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        let entity_type = self.entity_type;
        let mut records = self.storage.load_all().await;
        let Some(slot) = records.iter().position(|r| r.id() == &id) else {
            warn!(entity_type, %id, "Not found");
            return Err(StoreError::NotFound(id.to_string()));
        };

        let mut updated = records[slot].clone();
        updated.on_update(update).map_err(|e| {
            warn!(entity_type, %id, error = %e, "Update rejected");
            StoreError::entity(e)
        })?;
        // a key already shared on disk must not block unrelated edits
        if updated.unique_key() != records[slot].unique_key() {
            ensure_unique(entity_type, &records, &updated)?;
        }

        records[slot] = updated.clone();
        self.persist(&records).await?;
        info!(entity_type, %id, "Updated");
        Ok(updated)
    }

    async fn delete(&mut self, id: T::Id) -> Result<(), StoreError> {
        let entity_type = self.entity_type;
        let mut records = self.storage.load_all().await;
        let before = records.len();
        records.retain(|r| r.id() != &id);
        let removed = before - records.len();

        if removed == 0 && T::DELETE_POLICY == DeletePolicy::Strict {
            warn!(entity_type, %id, "Not found");
            return Err(StoreError::NotFound(id.to_string()));
        }

        self.persist(&records).await?;
        info!(entity_type, %id, removed, size = records.len(), "Deleted");
        Ok(())
    }

    async fn action(&mut self, id: T::Id, action: T::Action) -> Result<T::ActionResult, StoreError> {
        let entity_type = self.entity_type;
        let mut records = self.storage.load_all().await;
        let Some(record) = records.iter_mut().find(|r| r.id() == &id) else {
            warn!(entity_type, %id, "Not found");
            return Err(StoreError::NotFound(id.to_string()));
        };

        let result = record.handle_action(action).map_err(|e| {
            warn!(entity_type, %id, error = %e, "Action failed");
            StoreError::entity(e)
        })?;

        self.persist(&records).await?;
        info!(entity_type, %id, "Action ok");
        Ok(result)
    }

    async fn persist(&self, records: &[T]) -> Result<(), StoreError> {
        self.storage.persist(records).await.map_err(|e| {
            error!(entity_type = self.entity_type, error = %e, "Persist failed");
            StoreError::Storage(e)
        })
    }
}

/// Rejects `candidate` if another record already holds its unique key.
fn ensure_unique<T: RecordEntity>(
    entity_type: &str,
    records: &[T],
    candidate: &T,
) -> Result<(), StoreError> {
    let Some(key) = candidate.unique_key() else {
        return Ok(());
    };
    let taken = records
        .iter()
        .filter(|r| r.id() != candidate.id())
        .filter_map(|r| r.unique_key())
        .any(|existing| existing == key);

    if taken {
        warn!(entity_type, field = key.field, value = key.value, "Duplicate key");
        return Err(StoreError::DuplicateKey {
            field: key.field.to_string(),
            value: key.value.to_string(),
        });
    }
    Ok(())
}
