//! # Catalog & Cart Store
//!
//! A product catalog and shopping carts persisted as flat JSON files.
//!
//! Each collection is owned by one [`StoreActor`](record_framework::StoreActor)
//! from the `record-framework` crate. The actor is the only writer of its file:
//! every request reloads the file, applies one change and writes the whole
//! collection back before the next request is looked at.
//!
//! ## Modules
//!
//! - **[model]**: [`Product`](model::Product), [`Cart`](model::Cart) and their payloads.
//! - **[product_actor]** / **[cart_actor]**: entity rules and error types.
//! - **[clients]**: [`ProductClient`](clients::ProductClient) and [`CartClient`](clients::CartClient).
//! - **[config]**: file locations and format from the environment.
//! - **[lifecycle]**: [`CatalogSystem`](lifecycle::CatalogSystem) starts and stops both actors.
//!
//! ## Adding to a cart
//!
//! Adding a product that the cart already holds increases that line's
//! quantity; a new product is appended after the existing lines. Product
//! ids in a cart are not checked against the catalog.

pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
