//! Product storage.
//!
//! The [`ProductRepository`] trait is the seam handlers talk to, in the same
//! spirit as a storage backend abstraction: tests and the binary each build
//! their own store and inject it into the router.
//!
//! [`InMemoryProductStore`] keeps insertion order in a `Vec` behind a
//! `tokio::sync::RwLock`. Lookups are linear scans.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::AppError;

use super::product::{sample_products, NewProduct, Product, ProductPatch};
use super::query::{
    category_stats, list_products, search_products, CategoryStats, ListQuery, ProductPage,
    SearchResult,
};

// =============================================================================
// Repository Trait
// =============================================================================

/// Operations the HTTP layer needs from a product store.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Filter and paginate.
    async fn list(&self, query: &ListQuery) -> ProductPage;

    /// Fetch one product by id.
    async fn get(&self, id: &str) -> Result<Product, AppError>;

    /// Insert a new product and return it with its assigned id.
    async fn create(&self, new: NewProduct) -> Product;

    /// Apply a partial update and return the updated product.
    async fn update(&self, id: &str, patch: ProductPatch) -> Result<Product, AppError>;

    /// Remove a product and return it.
    async fn delete(&self, id: &str) -> Result<Product, AppError>;

    /// Case-insensitive name search.
    async fn search(&self, term: &str) -> SearchResult;

    /// Counts per category.
    async fn stats(&self) -> CategoryStats;
}

/// Error for an id that is not in the store.
pub fn product_not_found(id: &str) -> AppError {
    AppError::not_found(format!("Product with id {} not found", id))
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Ordered in-memory product collection.
///
/// Cloning is cheap and clones share the same collection.
#[derive(Clone, Default)]
pub struct InMemoryProductStore {
    products: Arc<RwLock<Vec<Product>>>,
}

impl InMemoryProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given products, in order.
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// Create a store seeded with the sample catalog.
    pub fn with_sample_data() -> Self {
        Self::with_products(sample_products().into_iter().map(Product::from_new).collect())
    }

    /// Number of stored products.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

}

/// Position of `id` in the collection. Ids that are not UUIDs never match.
fn position_of(products: &[Product], id: &str) -> Option<usize> {
    let id = Uuid::parse_str(id).ok()?;
    products.iter().position(|p| p.id == id)
}

#[async_trait]
impl ProductRepository for InMemoryProductStore {
    async fn list(&self, query: &ListQuery) -> ProductPage {
        let products = self.products.read().await;
        list_products(&products, query)
    }

    async fn get(&self, id: &str) -> Result<Product, AppError> {
        let products = self.products.read().await;
        position_of(&products, id)
            .and_then(|idx| products.get(idx))
            .cloned()
            .ok_or_else(|| product_not_found(id))
    }

    async fn create(&self, new: NewProduct) -> Product {
        let product = Product::from_new(new);
        self.products.write().await.push(product.clone());
        debug!(id = %product.id, "Created product");
        product
    }

    async fn update(&self, id: &str, patch: ProductPatch) -> Result<Product, AppError> {
        let mut products = self.products.write().await;
        let product = position_of(&products, id)
            .and_then(|idx| products.get_mut(idx))
            .ok_or_else(|| product_not_found(id))?;

        product.apply(patch);
        debug!(id = %product.id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: &str) -> Result<Product, AppError> {
        let mut products = self.products.write().await;
        let idx = position_of(&products, id).ok_or_else(|| product_not_found(id))?;
        let removed = products.remove(idx);
        debug!(id = %removed.id, "Deleted product");
        Ok(removed)
    }

    async fn search(&self, term: &str) -> SearchResult {
        let products = self.products.read().await;
        search_products(&products, term)
    }

    async fn stats(&self) -> CategoryStats {
        let products = self.products.read().await;
        category_stats(&products)
    }
}

// =============================================================================
// Tests
// =============================================================================
