//! # Observability
//!
//! Every store actor logs through `tracing` with an `entity_type` field
//! ("Product", "Cart"), so one subscriber covers all collections.
//!
//! - `info`: actor start/shutdown, successful Created / Updated / Deleted / Action ok
//! - `debug`: request payloads, reads, cold starts on a missing file
//! - `warn`: not found, duplicate keys, rejected payloads, unreadable files
//! - `error`: failed persists
//!
//! ```bash
//! RUST_LOG=info cargo run      # mutations only
//! RUST_LOG=debug cargo run     # full payloads
//! ```

/// Installs a compact `fmt` subscriber filtered by `RUST_LOG`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // entity_type already says where the line came from
        .compact()
        .init();
}
