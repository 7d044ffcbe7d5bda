//! Dashboard module
//!
//! Turns an account's transactions into the daily income/expense series and
//! totals shown on the account chart.

mod aggregation;
mod chart_endpoint;
mod range;

pub use aggregation::{ChartTotals, DailySummary, aggregate_by_day, summarise};
pub use chart_endpoint::{ChartData, get_account_chart_endpoint};
pub use range::DateRange;
