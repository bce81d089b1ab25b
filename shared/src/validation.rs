//! Validation rules for stock movement batches and departments
//!
//! Batch validation never stops at the first problem: every rule runs and
//! every violation is collected, so the caller can show one alert listing
//! everything that needs fixing.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    Department, DepartmentOptions, MovementType, NewDepartment, ProductCatalog, ProductSelection,
    Recipient, StockAction,
};
use crate::quantity::{parse_quantity, QuantityIssue};

// ============================================================================
// Movement Batch Validation
// ============================================================================

/// Which flow the batch comes from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Supplier delivery; nothing leaves the stockroom
    StockIn,
    /// Every row issues stock to a recipient
    Distribution,
    /// Manage-stock screen; each row's action decides
    Adjustment,
}

impl From<MovementType> for ValidationMode {
    fn from(movement_type: MovementType) -> Self {
        match movement_type {
            MovementType::StockIn => ValidationMode::StockIn,
            MovementType::Distribution => ValidationMode::Distribution,
        }
    }
}

impl ValidationMode {
    fn removes(&self, row: &ProductSelection) -> bool {
        match self {
            ValidationMode::StockIn => false,
            ValidationMode::Distribution => true,
            ValidationMode::Adjustment => row.action == StockAction::Remove,
        }
    }
}

/// A product chosen in more than one row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DuplicateSelection {
    pub product_id: String,
    pub product_name: String,
    /// Every row holding this product, 0-based
    pub rows: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvalidQuantity {
    pub row_index: usize,
    pub reason: QuantityIssue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InsufficientStock {
    pub row_index: usize,
    pub product_id: String,
    pub product_name: String,
    pub requested: u64,
    pub available: u64,
}

#[derive(Debug, Clone, Copy, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecipientIssue {
    #[error("Select a recipient department")]
    Missing,
    #[error("Describe the recipient when choosing \"Other\"")]
    OtherUnspecified,
}

/// Everything wrong with a batch
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub duplicates: Vec<DuplicateSelection>,
    pub invalid_quantities: Vec<InvalidQuantity>,
    pub insufficient_stock: Vec<InsufficientStock>,
    pub recipient: Option<RecipientIssue>,
    pub no_products_selected: bool,
}

impl ValidationReport {
    /// Submission must be refused while this holds
    pub fn is_blocking(&self) -> bool {
        !self.duplicates.is_empty()
            || !self.invalid_quantities.is_empty()
            || !self.insufficient_stock.is_empty()
            || self.recipient.is_some()
            || self.no_products_selected
    }

    /// One line per violation, rows numbered from 1
    pub fn messages(&self) -> Vec<String> {
        let mut messages = Vec::new();

        if self.no_products_selected {
            messages.push("Select at least one product".to_string());
        }

        for dup in &self.duplicates {
            let rows: Vec<String> = dup.rows.iter().map(|r| (r + 1).to_string()).collect();
            messages.push(format!(
                "\"{}\" is selected more than once (rows {})",
                dup.product_name,
                rows.join(", ")
            ));
        }

        for invalid in &self.invalid_quantities {
            messages.push(format!("Row {}: {}", invalid.row_index + 1, invalid.reason));
        }

        for short in &self.insufficient_stock {
            messages.push(format!(
                "Insufficient stock for \"{}\": requested {}, only {} available",
                short.product_name, short.requested, short.available
            ));
        }

        if let Some(issue) = self.recipient {
            messages.push(issue.to_string());
        }

        messages
    }
}

/// Validate a batch of form rows against a freshly fetched catalog
pub fn validate_selections(
    selections: &[ProductSelection],
    catalog: &ProductCatalog,
    mode: ValidationMode,
    recipient: Option<&Recipient>,
) -> ValidationReport {
    let chosen: Vec<(usize, &ProductSelection, &str)> = selections
        .iter()
        .enumerate()
        .filter_map(|(i, row)| row.product_id.as_deref().map(|id| (i, row, id)))
        .collect();

    let mut report = ValidationReport {
        no_products_selected: chosen.is_empty(),
        ..Default::default()
    };

    // Duplicates, in order of first appearance
    let mut rows_by_product: HashMap<&str, Vec<usize>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for &(i, _, id) in &chosen {
        let rows = rows_by_product.entry(id).or_default();
        if rows.is_empty() {
            order.push(id);
        }
        rows.push(i);
    }
    for id in order {
        let rows = &rows_by_product[id];
        if rows.len() > 1 {
            report.duplicates.push(DuplicateSelection {
                product_id: id.to_string(),
                product_name: product_name(catalog, id),
                rows: rows.clone(),
            });
        }
    }

    // Quantity validity, then sufficiency for removals that parsed
    for &(i, row, id) in &chosen {
        match parse_quantity(&row.quantity) {
            Err(reason) => report.invalid_quantities.push(InvalidQuantity {
                row_index: i,
                reason,
            }),
            Ok(requested) if mode.removes(row) => {
                let available = catalog.get(id).map(|p| p.quantity).unwrap_or(0);
                if requested > available {
                    report.insufficient_stock.push(InsufficientStock {
                        row_index: i,
                        product_id: id.to_string(),
                        product_name: product_name(catalog, id),
                        requested,
                        available,
                    });
                }
            }
            Ok(_) => {}
        }
    }

    let removes_stock = match mode {
        ValidationMode::StockIn => false,
        ValidationMode::Distribution => true,
        ValidationMode::Adjustment => chosen.iter().any(|(_, row, _)| mode.removes(row)),
    };
    if removes_stock {
        report.recipient = validate_recipient(recipient).err();
    }

    report
}

/// A recipient is required; "other" needs a description
pub fn validate_recipient(recipient: Option<&Recipient>) -> Result<(), RecipientIssue> {
    match recipient {
        None => Err(RecipientIssue::Missing),
        Some(Recipient::Department { id, .. }) if id.trim().is_empty() => {
            Err(RecipientIssue::Missing)
        }
        Some(Recipient::Other { specification }) if specification.trim().is_empty() => {
            Err(RecipientIssue::OtherUnspecified)
        }
        Some(_) => Ok(()),
    }
}

fn product_name(catalog: &ProductCatalog, id: &str) -> String {
    catalog
        .get(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| id.to_string())
}

// ============================================================================
// Department Validation
// ============================================================================

/// Icon choices offered for departments
pub const DEPARTMENT_ICONS: &[&str] = &[
    "restaurant",
    "local-cafe",
    "cleaning-services",
    "local-hospital",
    "school",
    "build",
    "store",
    "local-shipping",
    "inventory",
    "laptop",
    "sports-soccer",
    "local-florist",
    "pets",
    "child-care",
    "local-laundry-service",
    "security",
];

/// Color choices offered for departments
pub const DEPARTMENT_COLORS: &[&str] = &[
    "#E53935", "#D81B60", "#8E24AA", "#5E35B1", "#3949AB", "#1E88E5", "#039BE5", "#00ACC1",
    "#00897B", "#43A047", "#7CB342", "#C0CA33", "#FDD835", "#FFB300", "#FB8C00", "#6D4C41",
];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DepartmentIssue {
    #[error("Department name is required")]
    MissingName,
    #[error("Icon \"{0}\" is already used by another department")]
    IconInUse(String),
    #[error("Color \"{0}\" is already used by another department")]
    ColorInUse(String),
}

/// Icons not yet taken, in pool order
pub fn available_icons(existing: &[Department]) -> Vec<String> {
    unused(DEPARTMENT_ICONS, existing.iter().map(|d| d.icon.as_str()))
}

/// Colors not yet taken, in pool order
pub fn available_colors(existing: &[Department]) -> Vec<String> {
    unused(DEPARTMENT_COLORS, existing.iter().map(|d| d.color.as_str()))
}

pub fn department_options(existing: &[Department]) -> DepartmentOptions {
    DepartmentOptions {
        icons: available_icons(existing),
        colors: available_colors(existing),
    }
}

fn unused<'a>(pool: &[&str], used: impl Iterator<Item = &'a str>) -> Vec<String> {
    let used: HashSet<String> = used.map(|v| v.to_lowercase()).collect();
    pool.iter()
        .filter(|v| !used.contains(&v.to_lowercase()))
        .map(|v| v.to_string())
        .collect()
}

/// Validate a new department against those that already exist
pub fn validate_new_department(
    new: &NewDepartment,
    existing: &[Department],
) -> Result<(), DepartmentIssue> {
    if new.name.trim().is_empty() {
        return Err(DepartmentIssue::MissingName);
    }
    if existing.iter().any(|d| d.icon.eq_ignore_ascii_case(&new.icon)) {
        return Err(DepartmentIssue::IconInUse(new.icon.clone()));
    }
    if existing.iter().any(|d| d.color.eq_ignore_ascii_case(&new.color)) {
        return Err(DepartmentIssue::ColorInUse(new.color.clone()));
    }
    Ok(())
}
