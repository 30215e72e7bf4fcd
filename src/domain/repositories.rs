//! Repository Pattern Abstractions
//!
//! Persistence stays behind this trait so the decision core never sees a
//! storage backend. The in-memory implementation in
//! `infrastructure::repositories` covers tests and single-instance runs; a
//! hosted datastore implementation can be swapped in without touching the
//! services.

use crate::domain::catalog::TrackedProduct;
use anyhow::Result;
use async_trait::async_trait;

/// Repository for tracked products, keyed by marketplace item id
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert or overwrite a product record
    async fn save(&self, product: &TrackedProduct) -> Result<()>;

    /// Fetch one product by id
    async fn find_by_id(&self, id: &str) -> Result<Option<TrackedProduct>>;

    /// All tracked products, ordered by id
    async fn get_all(&self) -> Result<Vec<TrackedProduct>>;

    /// Count tracked products
    async fn count(&self) -> Result<usize>;
}
