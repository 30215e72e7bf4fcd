//! In-Memory Repository Implementation
//!
//! Thread-safe, in-memory implementation of `ProductRepository` backed by
//! `Arc<RwLock<HashMap>>`. Ideal for tests and single-instance runs; data is
//! lost on restart. For production persistence, implement the trait against
//! a hosted datastore.

use crate::domain::catalog::TrackedProduct;
use crate::domain::repositories::ProductRepository;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of ProductRepository
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<String, TrackedProduct>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryProductRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn save(&self, product: &TrackedProduct) -> Result<()> {
        self.products
            .write()
            .await
            .insert(product.id.clone(), product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<TrackedProduct>> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<TrackedProduct>> {
        let products = self.products.read().await;
        let mut all: Vec<TrackedProduct> = products.values().cloned().collect();
        // Deterministic iteration order for sync cycles and tests
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.products.read().await.len())
    }
}
