//! # Id Generation
//!
//! Record ids come from an [`IdGenerator`] owned by the store actor. The actor
//! additionally skips any generated id that is already present in the loaded
//! collection, so uniqueness within a collection does not rest on the
//! generator alone.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Source of fresh record ids.
///
/// A create gives up with `StoreError::IdExhausted` if every id drawn for it
/// is already taken, so generators should rarely repeat themselves.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Closures work as generators, e.g. `|| format!("cart_{}", counter.fetch_add(1, SeqCst))`.
impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn next_id(&self) -> String {
        self()
    }
}

/// Random 128-bit (v4) UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// `prefix_1`, `prefix_2`, ... Deterministic ids for tests and demos.
#[derive(Debug)]
pub struct SequentialIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        format!("{}_{}", self.prefix, n)
    }
}
