//! Catalog repository: the product list behind a mutual-exclusion boundary.
//!
//! Pricing consumes read snapshots; admin mutation goes through the write
//! lock and is written through to `products.json` so the catalog survives
//! restarts.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::sync::RwLock;

use wallcraft_common::product::{seed_products, Product, ProductId};

const CATALOG_FILE: &str = "products.json";

pub struct Catalog {
    path: PathBuf,
    products: RwLock<Vec<Product>>,
}

impl Catalog {
    /// Load the catalog from the data dir. A missing, unreadable or empty
    /// file falls back to the seed catalog; the file is created on first
    /// mutation.
    pub async fn open(data_dir: &Path) -> Catalog {
        let path = data_dir.join(CATALOG_FILE);
        let products = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice::<Vec<Product>>(&bytes) {
                Ok(products) if !products.is_empty() => products,
                Ok(_) => seed_products(),
                Err(err) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "unreadable catalog file, using seed products"
                    );
                    seed_products()
                }
            },
            Err(_) => seed_products(),
        };
        Catalog {
            path,
            products: RwLock::new(products),
        }
    }

    /// Snapshot of the full product list.
    pub async fn list(&self) -> Vec<Product> {
        self.products.read().await.clone()
    }

    pub async fn get(&self, id: &ProductId) -> Option<Product> {
        self.products
            .read()
            .await
            .iter()
            .find(|p| p.id == *id)
            .cloned()
    }

    /// Insert or replace a product by id, then persist.
    pub async fn upsert(&self, product: Product) -> Result<()> {
        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => *slot = product,
            None => products.push(product),
        }
        self.persist(&products).await
    }

    /// Apply `f` to the product with `id` under the write lock, then
    /// persist. Returns `false` when no such product exists.
    pub async fn modify<F>(&self, id: &ProductId, f: F) -> Result<bool>
    where
        F: FnOnce(&mut Product),
    {
        let mut products = self.products.write().await;
        {
            let Some(product) = products.iter_mut().find(|p| p.id == *id) else {
                return Ok(false);
            };
            f(product);
        }
        self.persist(&products).await?;
        Ok(true)
    }

    /// Delete a product by id, then persist. Returns whether anything was
    /// removed.
    pub async fn delete(&self, id: &ProductId) -> Result<bool> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != *id);
        let removed = products.len() != before;
        if removed {
            self.persist(&products).await?;
        }
        Ok(removed)
    }

    async fn persist(&self, products: &[Product]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(products).context("serializing catalog")?;
        tokio::fs::write(&self.path, bytes)
            .await
            .with_context(|| format!("writing catalog to {}", self.path.display()))
    }
}
