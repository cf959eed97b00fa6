//! # Record Framework
//!
//! Building blocks for durable, keyed record collections that are owned by a
//! single actor task. Each collection (products, carts, ...) lives in a flat
//! file; every request loads the whole file, mutates an in-memory copy and
//! writes the whole collection back.
//!
//! ## Why one actor per collection?
//!
//! A full-file read-modify-write is only safe if nobody else rewrites the file
//! in between. Routing every request for one collection through one
//! [`StoreActor`] makes it the single writer for that file: requests queue on
//! its channel and are applied one at a time, while different collections
//! still run in parallel.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`RecordEntity`]) - the record type, its payloads and rules
//! 2. **Storage Layer** ([`RecordStorage`]) - load / persist of the whole collection
//! 3. **Runtime Layer** ([`StoreActor`]) - sequential request processing
//! 4. **Interface Layer** ([`StoreClient`], [`RecordClient`]) - typed async calls
//!
//! ```rust
//! use record_framework::{DeletePolicy, MemoryStorage, RecordEntity, SequentialIds, StoreActor};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Debug, Serialize, Deserialize)]
//! struct Note { id: String, body: String }
//!
//! #[derive(Debug)] struct NoteCreate { body: String }
//! #[derive(Debug)] struct NoteUpdate { body: Option<String> }
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! impl RecordEntity for Note {
//!     type Id = String;
//!     type Create = NoteCreate;
//!     type Update = NoteUpdate;
//!     type Action = ();
//!     type ActionResult = ();
//!     type Error = NoteError;
//!
//!     const DELETE_POLICY: DeletePolicy = DeletePolicy::Strict;
//!
//!     fn id(&self) -> &String { &self.id }
//!
//!     fn from_create_params(id: String, params: NoteCreate) -> Result<Self, NoteError> {
//!         Ok(Self { id, body: params.body })
//!     }
//!
//!     fn on_update(&mut self, update: NoteUpdate) -> Result<(), NoteError> {
//!         if let Some(body) = update.body { self.body = body; }
//!         Ok(())
//!     }
//!
//!     fn handle_action(&mut self, _: ()) -> Result<(), NoteError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = StoreActor::<Note>::new(10, MemoryStorage::default(), SequentialIds::new("note"));
//!     tokio::spawn(actor.run());
//!
//!     let note = client.create(NoteCreate { body: "hello".into() }).await.unwrap();
//!     assert_eq!(note.id, "note_1");
//!     assert_eq!(client.get(note.id.clone()).await.unwrap().body, "hello");
//! }
//! ```
//!
//! ## Testing
//!
//! [`MemoryStorage`] keeps the serialized collection in memory and can be told
//! to fail writes. The [`mock`] module lets client wrappers be tested without a
//! running actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod id;
pub mod message;
pub mod mock;
pub mod storage;
pub mod telemetry;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::RecordClient;
pub use entity::{DeletePolicy, RecordEntity, UniqueKey};
pub use error::StoreError;
pub use id::{IdGenerator, SequentialIds, UuidGenerator};
pub use message::{Response, StoreRequest};
pub use storage::{
    JsonFileStorage, MemoryStorage, RecordStorage, StorageError, StorageFormat, UnknownFormat,
};
