//! The date range presets offered by the account chart.

use serde::{Deserialize, Serialize};

/// How far back the account chart looks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateRange {
    /// The last 7 days.
    #[serde(rename = "7D")]
    SevenDays,
    /// The last 30 days.
    #[default]
    #[serde(rename = "1M")]
    OneMonth,
    /// The last 90 days.
    #[serde(rename = "3M")]
    ThreeMonths,
    /// The last 180 days.
    #[serde(rename = "6M")]
    SixMonths,
    /// Every transaction.
    #[serde(rename = "ALL")]
    All,
}

impl DateRange {
    /// The number of days covered, or `None` for no limit.
    pub fn window_days(self) -> Option<i64> {
        match self {
            DateRange::SevenDays => Some(7),
            DateRange::OneMonth => Some(30),
            DateRange::ThreeMonths => Some(90),
            DateRange::SixMonths => Some(180),
            DateRange::All => None,
        }
    }
}
