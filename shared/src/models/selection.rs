//! Transient form rows for stock movement and manage-stock flows

use serde::{Deserialize, Serialize};

use super::{MovementType, Product};

/// Per-row action in the manage-stock flow
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockAction {
    #[default]
    Add,
    Remove,
}

/// One product row of a form session
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSelection {
    /// `None` while the row is still a placeholder
    #[serde(default)]
    pub product_id: Option<String>,
    /// Raw text as typed, validated later
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub action: StockAction,
}

impl ProductSelection {
    pub fn new(product_id: impl Into<String>, quantity: impl Into<String>, action: StockAction) -> Self {
        Self {
            product_id: Some(product_id.into()),
            quantity: quantity.into(),
            unit: String::new(),
            action,
        }
    }

    /// Pick a product for this row; the unit follows the product
    pub fn choose(&mut self, product: &Product) {
        self.product_id = Some(product.id.clone());
        self.unit = product.unit.clone();
    }

    /// Store typed input, keeping digits only
    pub fn set_quantity(&mut self, raw: &str) {
        self.quantity = sanitize_quantity_input(raw);
    }

    pub fn is_placeholder(&self) -> bool {
        self.product_id.is_none()
    }
}

/// Strip everything but ASCII digits from quantity input
pub fn sanitize_quantity_input(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Who receives removed stock
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recipient {
    Department { id: String, name: String },
    /// Generic "other" destination, described in free text
    Other { specification: String },
}

impl Recipient {
    pub fn display_name(&self) -> &str {
        match self {
            Recipient::Department { name, .. } => name,
            Recipient::Other { specification } => specification.trim(),
        }
    }
}

/// A movement form ready for validation and submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovementDraft {
    pub movement_type: MovementType,
    pub selections: Vec<ProductSelection>,
    pub stock_manager: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub recipient: Option<Recipient>,
}
