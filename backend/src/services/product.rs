//! Product catalog service

use std::sync::Arc;

use shared::models::{NewProduct, Product, ProductCatalog};

use crate::error::{AppError, AppResult};
use crate::external::InventoryApi;

#[derive(Clone)]
pub struct ProductService {
    api: Arc<dyn InventoryApi>,
}

impl ProductService {
    pub fn new(api: Arc<dyn InventoryApi>) -> Self {
        Self { api }
    }

    /// Current products with their resolved quantities
    pub async fn list(&self) -> AppResult<Vec<Product>> {
        Ok(self.catalog().await?.into_products())
    }

    /// A fresh id-indexed catalog, fetched on every call
    pub async fn catalog(&self) -> AppResult<ProductCatalog> {
        let raw = self.api.list_products().await?;
        Ok(ProductCatalog::from(raw))
    }

    pub async fn create(&self, product: NewProduct) -> AppResult<Product> {
        if product.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Product name is required".to_string(),
            });
        }
        let created = self.api.create_product(&product).await?;
        tracing::info!("Created product {} ({})", created.id, created.name);
        Ok(Product::from(created))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.api.delete_product(id).await?;
        tracing::info!("Deleted product {}", id);
        Ok(())
    }

    /// Fire-and-forget quantity overwrite from the catalog screen.
    ///
    /// Failures are logged and never reach the caller; the next refresh
    /// shows whatever the upstream holds.
    pub async fn quick_save(&self, id: &str, quantity: u64) {
        match self.api.update_quantity(id, quantity).await {
            Ok(()) => tracing::debug!("Quick-saved product {} at {}", id, quantity),
            Err(e) => tracing::warn!("Quick save for product {} failed: {}", id, e),
        }
    }
}
