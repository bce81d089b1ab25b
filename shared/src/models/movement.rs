//! Stock movement models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a recorded movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    /// Supplier delivery, increases stock
    StockIn,
    /// Issue to a department, decreases stock
    Distribution,
}

impl MovementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementType::StockIn => "stock_in",
            MovementType::Distribution => "distribution",
        }
    }

    /// Human label, also used for free-text search
    pub fn label(&self) -> &'static str {
        match self {
            MovementType::StockIn => "Stock In",
            MovementType::Distribution => "Distribution",
        }
    }
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Department embedded in a distribution record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DepartmentRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// One product line of a movement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovementLine {
    pub product_id: String,
    #[serde(default)]
    pub product_name: String,
    pub quantity: u64,
    #[serde(default)]
    pub unit: String,
    #[serde(default, alias = "price", skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,
}

/// A recorded stock transaction. Immutable once created; corrections are
/// new movements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: String,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    #[serde(alias = "date", alias = "createdAt")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub stock_manager: String,
    #[serde(default)]
    pub products: Vec<MovementLine>,
    #[serde(default)]
    pub total_items: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_value: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<DepartmentRef>,
}

impl Movement {
    /// Sum of line-item quantities
    pub fn line_units(&self) -> u64 {
        self.products.iter().map(|line| line.quantity).sum()
    }

    /// Value of a stock-in, from priced lines only
    pub fn computed_total_value(&self) -> Option<Decimal> {
        if self.movement_type != MovementType::StockIn {
            return None;
        }
        let priced: Vec<Decimal> = self
            .products
            .iter()
            .filter_map(|line| line.unit_price.map(|p| p * Decimal::from(line.quantity)))
            .collect();
        if priced.is_empty() {
            None
        } else {
            Some(priced.into_iter().sum())
        }
    }

    /// Declared item count matches the line items
    pub fn is_consistent(&self) -> bool {
        self.total_items == self.line_units()
    }

    pub fn department_name(&self) -> Option<&str> {
        match self.movement_type {
            MovementType::Distribution => self.department.as_ref().map(|d| d.name.as_str()),
            MovementType::StockIn => None,
        }
    }
}
