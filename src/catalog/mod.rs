//! Product catalog: records, query semantics and storage.

pub mod product;
pub mod query;
pub mod store;

pub use product::{sample_products, NewProduct, Product, ProductPatch};
pub use query::{
    category_stats, list_products, search_products, CategoryCounts, CategoryStats, ListQuery,
    ProductPage, SearchResult, DEFAULT_LIMIT, DEFAULT_PAGE, UNCATEGORIZED,
};
pub use store::{product_not_found, InMemoryProductStore, ProductRepository};
