//! Movement history aggregation for history and analytics views
//!
//! Filters narrow the record set in a fixed order (type, department,
//! period, search). The survivors are grouped by local calendar date and
//! summarized. Calendar dates are taken in the time zone of `now`.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Movement, MovementType};
use crate::types::{Period, TypeFilter};

/// Long-form date label used for section titles
pub const SECTION_DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// History view filters
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryFilters {
    #[serde(rename = "type")]
    pub movement_type: TypeFilter,
    /// Department id; `None` keeps every department
    pub department: Option<String>,
    pub period: Period,
    pub search: String,
}

/// Movements recorded on one calendar date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistorySection {
    pub title: String,
    pub date: NaiveDate,
    pub data: Vec<Movement>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistorySummary {
    pub stock_in_count: usize,
    pub distribution_count: usize,
    pub units_in: u64,
    pub units_out: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryView {
    pub sections: Vec<HistorySection>,
    pub summary: HistorySummary,
}

/// Filter, group and summarize movement history
pub fn aggregate<Tz: TimeZone>(
    movements: &[Movement],
    filters: &HistoryFilters,
    now: &DateTime<Tz>,
) -> HistoryView {
    let filtered = filter_movements(movements, filters, now);
    let summary = summarize(&filtered);

    let tz = now.timezone();
    let mut by_date: BTreeMap<NaiveDate, Vec<Movement>> = BTreeMap::new();
    for movement in filtered {
        let date = movement.timestamp.with_timezone(&tz).date_naive();
        by_date.entry(date).or_default().push(movement.clone());
    }

    let sections = by_date
        .into_iter()
        .rev()
        .map(|(date, mut data)| {
            data.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            HistorySection {
                title: date.format(SECTION_DATE_FORMAT).to_string(),
                date,
                data,
            }
        })
        .collect();

    HistoryView { sections, summary }
}

/// Apply the filters in order, keeping input order
pub fn filter_movements<'a, Tz: TimeZone>(
    movements: &'a [Movement],
    filters: &HistoryFilters,
    now: &DateTime<Tz>,
) -> Vec<&'a Movement> {
    let query = filters.search.trim().to_lowercase();
    let department = filters
        .department
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty() && !d.eq_ignore_ascii_case("all"));

    movements
        .iter()
        .filter(|m| filters.movement_type.matches(m.movement_type))
        .filter(|m| department.map_or(true, |d| matches_department(m, d)))
        .filter(|m| within_period(m.timestamp, filters.period, now))
        .filter(|m| query.is_empty() || matches_search(m, &query))
        .collect()
}

fn matches_department(movement: &Movement, department_id: &str) -> bool {
    match movement.movement_type {
        MovementType::StockIn => true,
        MovementType::Distribution => movement
            .department
            .as_ref()
            .is_some_and(|d| d.id == department_id),
    }
}

fn within_period<Tz: TimeZone>(timestamp: DateTime<Utc>, period: Period, now: &DateTime<Tz>) -> bool {
    let now_utc = now.with_timezone(&Utc);
    match period {
        Period::All => true,
        Period::Today => {
            let tz = now.timezone();
            timestamp.with_timezone(&tz).date_naive() == now.date_naive()
        }
        Period::Week | Period::Month => match period.window() {
            Some(window) => timestamp >= now_utc - window && timestamp <= now_utc,
            None => true,
        },
    }
}

/// `query` must already be trimmed and lowercased
fn matches_search(movement: &Movement, query: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(query);

    contains(movement.movement_type.label())
        || contains(&movement.stock_manager)
        || movement.notes.as_deref().is_some_and(contains)
        || movement.supplier.as_deref().is_some_and(contains)
        || movement.department_name().is_some_and(contains)
        || movement.products.iter().any(|line| contains(&line.product_name))
}

/// Counters over an already filtered set
pub fn summarize(movements: &[&Movement]) -> HistorySummary {
    movements
        .iter()
        .fold(HistorySummary::default(), |mut summary, m| {
            match m.movement_type {
                MovementType::StockIn => {
                    summary.stock_in_count += 1;
                    summary.units_in += m.line_units();
                }
                MovementType::Distribution => {
                    summary.distribution_count += 1;
                    summary.units_out += m.line_units();
                }
            }
            summary
        })
}
