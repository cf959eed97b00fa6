//! [`RecordEntity`] implementation for [`Product`].
//!
//! Products are keyed by a generated id and must carry a `code` unique across
//! the catalog. Deleting a missing product is an error.

use super::ProductError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use record_framework::{RecordEntity, UniqueKey};

impl RecordEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Action = ();
    type ActionResult = ();
    type Error = ProductError;

    fn id(&self) -> &ProductId {
        &self.id
    }

    /// Validates every field and builds the product. `status` defaults to `true`.
    fn from_create_params(id: ProductId, params: ProductCreate) -> Result<Self, ProductError> {
        require_text("title", &params.title)?;
        require_text("description", &params.description)?;
        require_text("code", &params.code)?;
        require_text("category", &params.category)?;
        require_price(params.price)?;

        Ok(Self {
            id,
            title: params.title,
            description: params.description,
            code: params.code,
            price: params.price,
            status: params.status.unwrap_or(true),
            stock: params.stock,
            category: params.category,
            thumbnails: params.thumbnails,
        })
    }

    fn unique_key(&self) -> Option<UniqueKey<'_>> {
        Some(UniqueKey {
            field: "code",
            value: &self.code,
        })
    }

    /// Merges the supplied fields. Nothing is applied if any field is invalid.
    fn on_update(&mut self, update: ProductUpdate) -> Result<(), ProductError> {
        for (field, value) in [
            ("title", &update.title),
            ("description", &update.description),
            ("code", &update.code),
            ("category", &update.category),
        ] {
            if let Some(value) = value {
                require_text(field, value)?;
            }
        }
        if let Some(price) = update.price {
            require_price(price)?;
        }

        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(code) = update.code {
            self.code = code;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(stock) = update.stock {
            self.stock = stock;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(thumbnails) = update.thumbnails {
            self.thumbnails = thumbnails;
        }
        Ok(())
    }

    fn handle_action(&mut self, _: ()) -> Result<(), ProductError> {
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), ProductError> {
    if value.trim().is_empty() {
        return Err(ProductError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_price(price: f64) -> Result<(), ProductError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ProductError::Validation(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ProductCreate {
        ProductCreate {
            title: "Mate".into(),
            description: "Calabash gourd".into(),
            code: "MATE-01".into(),
            price: 12.5,
            stock: 4,
            category: "kitchen".into(),
            status: None,
            thumbnails: Vec::new(),
        }
    }

    fn product() -> Product {
        Product::from_create_params("p1".into(), params()).unwrap()
    }

    #[test]
    fn test_create_defaults() {
        let product = product();
        assert!(product.status);
        assert!(product.thumbnails.is_empty());
        assert_eq!(product.unique_key().map(|k| k.value), Some("MATE-01"));
    }

    #[test]
    fn test_create_rejects_blank_and_negative() {
        let blank = ProductCreate {
            title: "  ".into(),
            ..params()
        };
        assert!(matches!(
            Product::from_create_params("p1".into(), blank),
            Err(ProductError::Validation(_))
        ));

        let negative = ProductCreate {
            price: -1.0,
            ..params()
        };
        assert!(Product::from_create_params("p1".into(), negative).is_err());

        let nan = ProductCreate {
            price: f64::NAN,
            ..params()
        };
        assert!(Product::from_create_params("p1".into(), nan).is_err());
    }

    #[test]
    fn test_zero_price_and_stock_allowed() {
        let free = ProductCreate {
            price: 0.0,
            stock: 0,
            ..params()
        };
        assert!(Product::from_create_params("p1".into(), free).is_ok());
    }

    #[test]
    fn test_partial_update_changes_only_given_fields() {
        let mut product = product();
        let before = product.clone();
        product
            .on_update(ProductUpdate {
                stock: Some(9),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(product.stock, 9);
        assert_eq!(
            Product {
                stock: before.stock,
                ..product.clone()
            },
            before
        );
    }

    #[test]
    fn test_invalid_update_applies_nothing() {
        let mut product = product();
        let before = product.clone();
        let result = product.on_update(ProductUpdate {
            stock: Some(1),
            title: Some(String::new()),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(product, before);
    }

    #[test]
    fn test_update_from_json_ignores_id() {
        let update =
            ProductUpdate::from_json(serde_json::json!({ "id": "hijack", "price": 3.0 })).unwrap();
        assert_eq!(update.price, Some(3.0));

        let mut product = product();
        product.on_update(update).unwrap();
        assert_eq!(product.id.as_str(), "p1");
    }

    #[test]
    fn test_update_from_json_rejects_unknown_fields() {
        let result = ProductUpdate::from_json(serde_json::json!({ "colour": "red" }));
        assert!(matches!(result, Err(ProductError::Validation(_))));
        assert!(ProductUpdate::from_json(serde_json::json!({})).unwrap().is_empty());
    }
}
