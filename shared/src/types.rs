//! Common types used across the platform

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::models::MovementType;

/// Time window for history and report views
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Today,
    Week,
    Month,
    #[default]
    All,
}

impl Period {
    /// Trailing window length for rolling periods.
    ///
    /// `Today` is a calendar-date match rather than a window, and `All`
    /// has no bound, so both return `None`.
    pub fn window(&self) -> Option<Duration> {
        match self {
            Period::Week => Some(Duration::hours(7 * 24)),
            Period::Month => Some(Duration::hours(30 * 24)),
            Period::Today | Period::All => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Today => "today",
            Period::Week => "week",
            Period::Month => "month",
            Period::All => "all",
        }
    }
}

/// Movement type selector for history views
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TypeFilter {
    #[default]
    All,
    StockIn,
    Distribution,
}

impl TypeFilter {
    pub fn matches(&self, movement_type: MovementType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::StockIn => movement_type == MovementType::StockIn,
            TypeFilter::Distribution => movement_type == MovementType::Distribution,
        }
    }
}
