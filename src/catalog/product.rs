//! Product records and the typed inputs that create or modify them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry.
///
/// `id` is assigned by the store at creation and never changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

impl Product {
    /// Build a product from a validated create payload with a fresh id.
    pub fn from_new(new: NewProduct) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            price: new.price,
            category: new.category,
            in_stock: new.in_stock,
        }
    }

    /// Apply a partial update. Fields absent from the patch are left alone.
    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(in_stock) = patch.in_stock {
            self.in_stock = in_stock;
        }
    }
}

/// Fully specified payload for a create.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub in_stock: bool,
}

/// Partial payload for an update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

/// Products a fresh service starts with.
pub fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Wireless Mouse".to_string(),
            description: "Ergonomic wireless mouse".to_string(),
            price: 24.99,
            category: "electronics".to_string(),
            in_stock: true,
        },
        NewProduct {
            name: "Notebook".to_string(),
            description: "200 page ruled notebook".to_string(),
            price: 3.5,
            category: "stationery".to_string(),
            in_stock: true,
        },
    ]
}
