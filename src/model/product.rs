//! Catalog products.

use crate::model::define_id;
use crate::product_actor::ProductError;
use serde::{Deserialize, Serialize};

define_id!(ProductId);

/// A catalog product.
///
/// # Record Framework
/// This struct implements the [`RecordEntity`](record_framework::RecordEntity) trait,
/// allowing it to be managed by a [`StoreActor`](record_framework::StoreActor).
///
/// See [`impl RecordEntity for Product`](#impl-RecordEntity-for-Product) for details on:
/// - Creation parameters ([`ProductCreate`])
/// - Update parameters ([`ProductUpdate`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: f64,
    pub status: bool,
    pub stock: u32,
    pub category: String,
    #[serde(default)]
    pub thumbnails: Vec<String>,
}

/// Payload for inserting a product. `status` defaults to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub title: String,
    pub description: String,
    pub code: String,
    pub price: f64,
    pub stock: u32,
    pub category: String,
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub thumbnails: Vec<String>,
}

/// Partial update of a product. `None` leaves the field as it is.
///
/// There is no `id` field: a product's id cannot be changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnails: Option<Vec<String>>,
}

impl ProductUpdate {
    /// Builds an update from a JSON object such as a request body.
    ///
    /// An `id` key is dropped. Any other key that is not a product field, or
    /// a value of the wrong type, is a validation error.
    pub fn from_json(mut patch: serde_json::Value) -> Result<Self, ProductError> {
        if let Some(fields) = patch.as_object_mut() {
            fields.remove("id");
        }
        serde_json::from_value(patch).map_err(|e| ProductError::Validation(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A full replacement: every mutable field is overwritten.
impl From<ProductCreate> for ProductUpdate {
    fn from(params: ProductCreate) -> Self {
        Self {
            title: Some(params.title),
            description: Some(params.description),
            code: Some(params.code),
            price: Some(params.price),
            stock: Some(params.stock),
            category: Some(params.category),
            status: params.status,
            thumbnails: Some(params.thumbnails),
        }
    }
}
