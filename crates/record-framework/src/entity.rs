//! # RecordEntity Trait
//!
//! The contract a record type implements to be managed by a [`StoreActor`](crate::StoreActor).
//!
//! Associated types pin down the payload of every operation: a `Product`
//! store only accepts `ProductCreate` on insert and `ProductUpdate` on update,
//! and the compiler rejects anything else.
//!
//! The hooks are plain synchronous functions. They run on a copy of the record
//! loaded from storage; the actor only persists the copy when the hook returns
//! `Ok`, so a failing hook never reaches disk.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

/// What `delete` does when the id is not in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Missing id fails with `NotFound`; nothing is written.
    Strict,
    /// Missing id is a no-op; the filtered collection is persisted anyway.
    Lenient,
}

/// A field whose value must not repeat across the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueKey<'a> {
    pub field: &'static str,
    pub value: &'a str,
}

/// Trait that any persisted record must implement to be managed by `StoreActor`.
pub trait RecordEntity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The caller-visible key. Built from the string produced by the store's
    /// [`IdGenerator`](crate::IdGenerator).
    type Id: Eq + Clone + Send + Sync + Display + Debug + From<String>;

    /// The data required to insert a new record.
    type Create: Send + Debug;

    /// The named optional fields applied by `update`.
    type Update: Send + Debug;

    /// Record-specific mutations (e.g. adding a product to a cart).
    type Action: Send + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Debug;

    /// The error type for this record kind.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Delete behaviour for this record kind.
    const DELETE_POLICY: DeletePolicy = DeletePolicy::Strict;

    /// The record's key.
    fn id(&self) -> &Self::Id;

    /// Build a full record from a freshly generated id and the create payload.
    /// Validation of the payload belongs here.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// The uniqueness-constrained field, if this record kind has one.
    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        None
    }

    /// Apply a partial update. Fields absent from `update` must be left alone
    /// and the id must never change.
    fn on_update(&mut self, update: Self::Update) -> Result<(), Self::Error>;

    /// Handle a custom record-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}
