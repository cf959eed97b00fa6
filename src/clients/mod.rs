//! Type-safe wrappers around [`StoreClient`](record_framework::StoreClient).

pub mod cart_client;
pub mod product_client;

pub use cart_client::*;
pub use product_client::*;
pub use record_framework::RecordClient;
