//! # Store Requests
//!
//! Message types sent from a [`StoreClient`](crate::StoreClient) to its
//! [`StoreActor`](crate::StoreActor).

use crate::entity::RecordEntity;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the store actor.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// One request against a record collection.
///
/// The variants map onto the collection's operations: `List` and `Get` read,
/// `Create`, `Update` and `Delete` are the CRUD mutations, and `Action` runs a
/// record-specific [`RecordEntity::Action`] such as adding a product to a cart.
/// Every mutation is a full read-modify-write of the backing storage.
#[derive(Debug)]
pub enum StoreRequest<T: RecordEntity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
