//! WebAssembly module for the Stockroom inventory platform
//!
//! Provides on-device computation for the mobile client:
//! - Stock quantity resolution for raw product records
//! - Movement batch validation and reconciliation
//! - History grouping and summary counters
//!
//! Every function takes and returns JSON strings.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::history::*;
pub use shared::models::*;
pub use shared::quantity::*;
pub use shared::reconcile::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {}

fn parse<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

fn parse_mode(mode: &str) -> Result<ValidationMode, JsValue> {
    parse(&format!("\"{}\"", mode), "validation mode")
}

fn catalog_from(products_json: &str) -> Result<ProductCatalog, JsValue> {
    let raw: Vec<RawProduct> = parse(products_json, "products")?;
    Ok(ProductCatalog::from(raw))
}

/// Canonical quantity of one raw product record
#[wasm_bindgen]
pub fn resolve_product_quantity(product_json: &str) -> Result<f64, JsValue> {
    let record: serde_json::Value = parse(product_json, "product")?;
    Ok(resolve_quantity_value(&record) as f64)
}

/// Keep only the digits of typed quantity input
#[wasm_bindgen]
pub fn sanitize_quantity_input(raw: &str) -> String {
    shared::models::sanitize_quantity_input(raw)
}

/// Validate form rows; returns the report with its alert lines
#[wasm_bindgen]
pub fn validate_selections_json(
    selections_json: &str,
    products_json: &str,
    mode: &str,
    recipient_json: Option<String>,
) -> Result<String, JsValue> {
    let selections: Vec<ProductSelection> = parse(selections_json, "selections")?;
    let catalog = catalog_from(products_json)?;
    let mode = parse_mode(mode)?;
    let recipient: Option<Recipient> = match recipient_json.as_deref() {
        Some(json) if !json.trim().is_empty() => parse(json, "recipient")?,
        _ => None,
    };

    let report = validate_selections(&selections, &catalog, mode, recipient.as_ref());

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        blocking: bool,
        messages: Vec<String>,
        report: ValidationReport,
    }

    to_json(&Response {
        blocking: report.is_blocking(),
        messages: report.messages(),
        report,
    })
}

/// Add/remove payloads and totals for the manage-stock flow
#[wasm_bindgen]
pub fn reconcile_selections_json(selections_json: &str) -> Result<String, JsValue> {
    let selections: Vec<ProductSelection> = parse(selections_json, "selections")?;
    let reconciliation = reconcile(&selections);

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Response {
        #[serde(flatten)]
        reconciliation: StockReconciliation,
        message: String,
    }

    to_json(&Response {
        message: reconciliation.confirmation_message(),
        reconciliation,
    })
}

/// Create-movement body for a draft
#[wasm_bindgen]
pub fn build_movement_request_json(draft_json: &str, products_json: &str) -> Result<String, JsValue> {
    let draft: MovementDraft = parse(draft_json, "movement draft")?;
    let catalog = catalog_from(products_json)?;
    to_json(&build_movement_request(&draft, &catalog))
}

/// Group and summarize history at an explicit instant and UTC offset
#[wasm_bindgen]
pub fn aggregate_history_json(
    movements_json: &str,
    filters_json: &str,
    now_ms: f64,
    utc_offset_minutes: i32,
) -> Result<String, JsValue> {
    let movements: Vec<Movement> = parse(movements_json, "movements")?;
    let filters: HistoryFilters = if filters_json.trim().is_empty() {
        HistoryFilters::default()
    } else {
        parse(filters_json, "filters")?
    };
    let now = local_instant(now_ms, utc_offset_minutes)?;
    to_json(&aggregate(&movements, &filters, &now))
}

/// Group and summarize history using the device clock and time zone
#[wasm_bindgen]
pub fn aggregate_history_local(movements_json: &str, filters_json: &str) -> Result<String, JsValue> {
    let date = js_sys::Date::new_0();
    // getTimezoneOffset is minutes *behind* UTC
    let offset = -(date.get_timezone_offset() as i32);
    aggregate_history_json(movements_json, filters_json, date.get_time(), offset)
}

/// Icons and colors still free for a new department
#[wasm_bindgen]
pub fn department_options_json(departments_json: &str) -> Result<String, JsValue> {
    let departments: Vec<Department> = parse(departments_json, "departments")?;
    to_json(&department_options(&departments))
}

fn local_instant(now_ms: f64, utc_offset_minutes: i32) -> Result<DateTime<FixedOffset>, JsValue> {
    let offset = FixedOffset::east_opt(utc_offset_minutes * 60)
        .ok_or_else(|| JsValue::from_str("UTC offset out of range"))?;
    let utc: DateTime<Utc> = DateTime::from_timestamp_millis(now_ms as i64)
        .ok_or_else(|| JsValue::from_str("Timestamp out of range"))?;
    Ok(utc.with_timezone(&offset))
}
