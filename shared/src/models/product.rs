//! Product catalog models

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::quantity::resolve_quantity;

/// A product with its canonical current quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Free-form unit label ("kg", "units", ...)
    pub unit: String,
    pub quantity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl Product {
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity == 0
    }

    /// In stock, but at or below the given threshold
    pub fn is_low_stock(&self, threshold: u64) -> bool {
        self.quantity > 0 && self.quantity <= threshold
    }
}

/// Product record as delivered by the inventory API.
///
/// The stock count is not guaranteed to use a single field name, so all
/// known spellings are captured untyped and resolved on conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProduct {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

impl From<RawProduct> for Product {
    fn from(raw: RawProduct) -> Self {
        let quantity = resolve_quantity(&raw);
        Self {
            id: raw.id,
            name: raw.name,
            unit: raw.unit,
            quantity,
            category: raw.category,
            price: raw.price,
        }
    }
}

/// Input for creating a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub unit: String,
    #[serde(default)]
    pub quantity: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
}

/// Id-indexed view over a freshly fetched product list
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl ProductCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        let index = products
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id.clone(), i))
            .collect();
        Self { products, index }
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).and_then(|&i| self.products.get(i))
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn out_of_stock(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_out_of_stock()).collect()
    }

    pub fn low_stock(&self, threshold: u64) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_low_stock(threshold))
            .collect()
    }

    pub fn total_units(&self) -> u64 {
        self.products.iter().map(|p| p.quantity).sum()
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }
}

impl From<Vec<RawProduct>> for ProductCatalog {
    fn from(raw: Vec<RawProduct>) -> Self {
        Self::new(raw.into_iter().map(Product::from).collect())
    }
}

impl FromIterator<Product> for ProductCatalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
