//! Stock reconciliation: turning validated form rows into API payloads
//!
//! Pure transforms consumed right before an inventory API call. The totals
//! exist for confirmation text only; the inventory API decides whether the
//! operation succeeds.

use serde::{Deserialize, Serialize};

use crate::models::{
    MovementDraft, MovementType, ProductCatalog, ProductSelection, Recipient, StockAction,
};
use crate::quantity::parse_quantity;

/// Body item for the add-quantity call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockAddition {
    pub product_id: String,
    pub quantity_to_add: u64,
}

/// Body item for the remove-quantity call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockRemoval {
    pub product_id: String,
    pub quantity_to_remove: u64,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationTotals {
    pub total_add: u64,
    pub total_remove: u64,
    pub products_add: usize,
    pub products_remove: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StockReconciliation {
    pub to_add: Vec<StockAddition>,
    pub to_remove: Vec<StockRemoval>,
    pub totals: ReconciliationTotals,
}

impl StockReconciliation {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Text shown to the user before dispatch
    pub fn confirmation_message(&self) -> String {
        let t = &self.totals;
        let add = format!("add {} across {}", units(t.total_add), products(t.products_add));
        let remove = format!(
            "remove {} across {}",
            units(t.total_remove),
            products(t.products_remove)
        );
        match (self.to_add.is_empty(), self.to_remove.is_empty()) {
            (true, true) => "No stock changes to apply".to_string(),
            (false, true) => format!("You are about to {}", add),
            (true, false) => format!("You are about to {}", remove),
            (false, false) => format!("You are about to {} and {}", add, remove),
        }
    }
}

fn units(n: u64) -> String {
    if n == 1 {
        "1 unit".to_string()
    } else {
        format!("{} units", n)
    }
}

fn products(n: usize) -> String {
    if n == 1 {
        "1 product".to_string()
    } else {
        format!("{} products", n)
    }
}

/// Split rows into add and remove payloads.
///
/// Rows without a product or without a positive quantity are dropped.
/// Duplicate products are rejected by validation beforehand, so no merge
/// by product id happens here.
pub fn reconcile(selections: &[ProductSelection]) -> StockReconciliation {
    let mut result = StockReconciliation::default();

    for (row, product_id, quantity) in usable_rows(selections) {
        match row.action {
            StockAction::Add => result.to_add.push(StockAddition {
                product_id: product_id.to_string(),
                quantity_to_add: quantity,
            }),
            StockAction::Remove => result.to_remove.push(StockRemoval {
                product_id: product_id.to_string(),
                quantity_to_remove: quantity,
            }),
        }
    }

    result.totals = ReconciliationTotals {
        total_add: result.to_add.iter().map(|a| a.quantity_to_add).sum(),
        total_remove: result.to_remove.iter().map(|r| r.quantity_to_remove).sum(),
        products_add: result.to_add.len(),
        products_remove: result.to_remove.len(),
    };

    result
}

fn usable_rows<'a>(
    selections: &'a [ProductSelection],
) -> impl Iterator<Item = (&'a ProductSelection, &'a str, u64)> + 'a {
    selections.iter().filter_map(|row| {
        let id = row.product_id.as_deref()?;
        let quantity = parse_quantity(&row.quantity).ok()?;
        Some((row, id, quantity))
    })
}

// ============================================================================
// Movement Request
// ============================================================================

/// Product line in the create-movement body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MovementProductPayload {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u64,
    pub unit: String,
}

/// Body of the create-movement call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovementRequest {
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    pub stock_manager: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub products: Vec<MovementProductPayload>,
}

impl CreateMovementRequest {
    pub fn total_items(&self) -> u64 {
        self.products.iter().map(|p| p.quantity).sum()
    }
}

/// Build the create-movement body from a validated draft
pub fn build_movement_request(
    draft: &MovementDraft,
    catalog: &ProductCatalog,
) -> CreateMovementRequest {
    let products = usable_rows(&draft.selections)
        .map(|(row, id, quantity)| {
            let product = catalog.get(id);
            let unit = if row.unit.trim().is_empty() {
                product.map(|p| p.unit.clone()).unwrap_or_default()
            } else {
                row.unit.clone()
            };
            MovementProductPayload {
                product_id: id.to_string(),
                product_name: product
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| id.to_string()),
                quantity,
                unit,
            }
        })
        .collect();

    let department = match (draft.movement_type, &draft.recipient) {
        (MovementType::Distribution, Some(Recipient::Department { id, .. })) => Some(id.clone()),
        (MovementType::Distribution, Some(Recipient::Other { specification })) => {
            non_blank(Some(specification))
        }
        _ => None,
    };

    let supplier = match draft.movement_type {
        MovementType::StockIn => non_blank(draft.supplier.as_ref()),
        MovementType::Distribution => None,
    };

    CreateMovementRequest {
        movement_type: draft.movement_type,
        department,
        supplier,
        stock_manager: draft.stock_manager.trim().to_string(),
        notes: non_blank(draft.notes.as_ref()),
        products,
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
