//! Movement history handlers

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use shared::history::HistoryFilters;
use shared::types::{Period, TypeFilter};

use crate::error::AppResult;
use crate::services::HistoryService;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(rename = "type")]
    pub movement_type: Option<TypeFilter>,
    pub department: Option<String>,
    pub period: Option<Period>,
    pub search: Option<String>,
    pub format: Option<String>, // "json" or "csv"
}

impl HistoryQuery {
    pub fn filters(&self) -> HistoryFilters {
        HistoryFilters {
            movement_type: self.movement_type.unwrap_or_default(),
            department: self.department.clone(),
            period: self.period.unwrap_or_default(),
            search: self.search.clone().unwrap_or_default(),
        }
    }
}

/// Grouped history, or a CSV export with `format=csv`
pub async fn get_history(
    State(state): State<AppState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query?;
    let service = HistoryService::new(state.api, state.config.inventory.utc_offset());
    let filters = query.filters();

    if query.format.as_deref() == Some("csv") {
        let csv = service.export_csv(&filters).await?;
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"movement_history.csv\""),
            ],
            csv,
        )
            .into_response());
    }

    let view = service.history(&filters).await?;
    Ok(Json(view).into_response())
}
