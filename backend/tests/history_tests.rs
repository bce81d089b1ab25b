//! Movement history tests
//!
//! Tests for the history view including:
//! - Grouping by local calendar date
//! - Period, department and search filters
//! - CSV export with one row per line item

mod common;

use chrono::{DateTime, FixedOffset};
use common::FakeInventoryApi;
use serde_json::json;
use shared::history::HistoryFilters;
use shared::types::{Period, TypeFilter};
use stockroom_backend::services::HistoryService;
use std::sync::Arc;

fn bangkok() -> FixedOffset {
    FixedOffset::east_opt(7 * 3600).unwrap()
}

fn now() -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339("2024-03-10T12:00:00+07:00").unwrap()
}

fn fake_with_history() -> Arc<FakeInventoryApi> {
    let fake = FakeInventoryApi::new();
    fake.set_movements(json!([
        {
            "id": "M3", "type": "distribution", "timestamp": "2024-03-09T10:00:00Z",
            "stockManager": "Ben", "totalItems": 1,
            "department": {"id": "D2", "name": "Cleaning"},
            "products": [{"productId": "P2", "productName": "Soap", "quantity": 1, "unit": "bars"}]
        },
        {
            "id": "M1", "type": "stock_in", "timestamp": "2024-03-10T02:00:00Z",
            "stockManager": "Ana", "totalItems": 20, "supplier": "Farm Co",
            "products": [{"productId": "P1", "productName": "Rice", "quantity": 20, "unit": "kg"}]
        },
        {
            "id": "M4", "type": "stock_in", "date": "2024-01-01T00:00:00Z",
            "stockManager": "Ana", "totalItems": 5, "notes": "Opening balance",
            "products": [{"productId": "P3", "productName": "Gloves", "quantity": 5, "unit": "pairs"}]
        },
        {
            "id": "M2", "type": "distribution", "timestamp": "2024-03-09T18:30:00Z",
            "stockManager": "Ana", "totalItems": 5,
            "department": {"id": "D1", "name": "Kitchen"},
            "products": [
                {"productId": "P2", "productName": "Soap", "quantity": 3, "unit": "bars"},
                {"productId": "P1", "productName": "Rice", "quantity": 2, "unit": "kg"}
            ]
        }
    ]));
    fake
}

fn ids(view: &shared::history::HistoryView) -> Vec<Vec<String>> {
    view.sections
        .iter()
        .map(|s| s.data.iter().map(|m| m.id.clone()).collect())
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[tokio::test]
    async fn test_sections_follow_local_dates() {
        let fake = fake_with_history();
        let service = HistoryService::new(fake.as_api(), bangkok());

        let view = service
            .history_at(&HistoryFilters::default(), &now())
            .await
            .unwrap();

        // M2 is 2024-03-09 in UTC but already March 10 in UTC+7
        assert_eq!(ids(&view), vec![vec!["M1", "M2"], vec!["M3"], vec!["M4"]]);
        assert_eq!(view.sections[0].title, "Sunday, March 10, 2024");
        assert_eq!(view.summary.stock_in_count, 2);
        assert_eq!(view.summary.distribution_count, 2);
        assert_eq!(view.summary.units_in, 25);
        assert_eq!(view.summary.units_out, 6);
    }

    #[tokio::test]
    async fn test_period_filters() {
        let fake = fake_with_history();
        let service = HistoryService::new(fake.as_api(), bangkok());

        let today = HistoryFilters {
            period: Period::Today,
            ..Default::default()
        };
        let view = service.history_at(&today, &now()).await.unwrap();
        assert_eq!(ids(&view), vec![vec!["M1", "M2"]]);

        let week = HistoryFilters {
            period: Period::Week,
            ..Default::default()
        };
        let view = service.history_at(&week, &now()).await.unwrap();
        assert_eq!(view.sections.len(), 2);
        assert_eq!(view.summary.units_in, 20);
    }

    #[tokio::test]
    async fn test_department_filter_keeps_stock_in() {
        let fake = fake_with_history();
        let service = HistoryService::new(fake.as_api(), bangkok());

        let filters = HistoryFilters {
            department: Some("D2".to_string()),
            ..Default::default()
        };
        let view = service.history_at(&filters, &now()).await.unwrap();

        assert_eq!(ids(&view), vec![vec!["M1"], vec!["M3"], vec!["M4"]]);
    }

    #[tokio::test]
    async fn test_search_and_type_filters() {
        let fake = fake_with_history();
        let service = HistoryService::new(fake.as_api(), bangkok());

        let filters = HistoryFilters {
            search: "  KITCHEN ".to_string(),
            ..Default::default()
        };
        let view = service.history_at(&filters, &now()).await.unwrap();
        assert_eq!(ids(&view), vec![vec!["M2"]]);

        let filters = HistoryFilters {
            movement_type: TypeFilter::StockIn,
            search: "rice".to_string(),
            ..Default::default()
        };
        let view = service.history_at(&filters, &now()).await.unwrap();
        assert_eq!(ids(&view), vec![vec!["M1"]]);
        assert_eq!(view.summary.distribution_count, 0);
    }

    #[tokio::test]
    async fn test_empty_history() {
        let fake = FakeInventoryApi::new();
        let service = HistoryService::new(fake.as_api(), bangkok());

        let view = service
            .history_at(&HistoryFilters::default(), &now())
            .await
            .unwrap();
        assert!(view.sections.is_empty());
        assert_eq!(view.summary.units_out, 0);
    }

    #[tokio::test]
    async fn test_stock_in_value_derived_from_priced_lines() {
        let fake = FakeInventoryApi::new();
        fake.set_movements(json!([
            {
                "id": "M1", "type": "stock_in", "timestamp": "2024-03-10T02:00:00Z",
                "totalItems": 4,
                "products": [{"productId": "P1", "quantity": 4, "unitPrice": 3}]
            },
            {
                "id": "M2", "type": "stock_in", "timestamp": "2024-03-10T03:00:00Z",
                "totalItems": 1, "totalValue": 99,
                "products": [{"productId": "P1", "quantity": 1, "unitPrice": 3}]
            }
        ]));
        let service = HistoryService::new(fake.as_api(), bangkok());

        let view = service
            .history_at(&HistoryFilters::default(), &now())
            .await
            .unwrap();

        let values: Vec<(String, Option<String>)> = view.sections[0]
            .data
            .iter()
            .map(|m| (m.id.clone(), m.total_value.map(|v| v.to_string())))
            .collect();
        assert_eq!(
            values,
            vec![
                ("M2".to_string(), Some("99".to_string())),
                ("M1".to_string(), Some("12".to_string())),
            ]
        );
    }

    #[tokio::test]
    async fn test_inconsistent_movement_is_still_listed() {
        let fake = FakeInventoryApi::new();
        fake.set_movements(json!([
            {
                "id": "M1", "type": "distribution", "timestamp": "2024-03-10T02:00:00Z",
                "totalItems": 9,
                "department": {"id": "D1", "name": "Kitchen"},
                "products": [{"productId": "P1", "quantity": 2}]
            }
        ]));
        let service = HistoryService::new(fake.as_api(), bangkok());

        let view = service
            .history_at(&HistoryFilters::default(), &now())
            .await
            .unwrap();

        assert_eq!(ids(&view), vec![vec!["M1"]]);
        // Counters use line items, not the declared total
        assert_eq!(view.summary.units_out, 2);
        assert_eq!(view.sections[0].data[0].total_value, None);
    }

    #[tokio::test]
    async fn test_csv_has_one_row_per_line_item() {
        let fake = fake_with_history();
        let service = HistoryService::new(fake.as_api(), bangkok());

        let csv = service
            .export_csv_at(&HistoryFilters::default(), &now())
            .await
            .unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "date,time,movement_id,type,stock_manager,counterparty,product_id,product_name,quantity,unit,notes"
        );
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "2024-03-10,09:00,M1,stock_in,Ana,Farm Co,P1,Rice,20,kg,");
        assert_eq!(lines[2], "2024-03-10,01:30,M2,distribution,Ana,Kitchen,P2,Soap,3,bars,");
        assert_eq!(lines[3], "2024-03-10,01:30,M2,distribution,Ana,Kitchen,P1,Rice,2,kg,");
        assert!(lines[5].ends_with("Opening balance"));
    }

    #[tokio::test]
    async fn test_csv_respects_filters() {
        let fake = fake_with_history();
        let service = HistoryService::new(fake.as_api(), bangkok());

        let filters = HistoryFilters {
            movement_type: TypeFilter::Distribution,
            ..Default::default()
        };
        let csv = service.export_csv_at(&filters, &now()).await.unwrap();

        assert_eq!(csv.lines().count(), 4);
        assert!(!csv.contains("stock_in"));
    }
}
