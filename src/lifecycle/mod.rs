//! # System Lifecycle
//!
//! Starts one store actor per collection and stops them again.
//!
//! Products and carts are independent collections: each has its own actor,
//! channel and file, so work on one never waits on the other. Inside a
//! collection every request is applied in arrival order.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of each channel
//! 2. **Actors drain** - requests already queued are still applied
//! 3. **Await completion** - the actor tasks are joined
//!
//! Clones of a client held elsewhere keep their actor alive, so shutdown
//! waits until those are dropped too.

pub mod catalog_system;

pub use catalog_system::*;
pub use record_framework::telemetry::setup_tracing;
