//! Defines the endpoint serving the account chart data.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::Response,
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, UserID,
    account::get_account,
    dashboard::{
        aggregation::{ChartTotals, DailySummary, aggregate_by_day, summarise},
        range::DateRange,
    },
    database_id::AccountId,
    extract::{ApiPath, ApiQuery},
    response::success,
    timezone::local_today,
    transaction::get_account_transactions,
};

/// The state needed to build an account chart.
#[derive(Debug, Clone)]
pub struct ChartState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The canonical timezone used to decide what "today" is.
    pub local_timezone: String,
}

impl FromRef<AppState> for ChartState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query string accepted by the chart endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ChartQuery {
    /// The range to chart, defaults to one month.
    #[serde(default)]
    pub range: DateRange,
}

/// The daily series and totals for an account chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// The range the series covers.
    pub range: DateRange,
    /// One entry per day with at least one transaction, oldest first.
    pub days: Vec<DailySummary>,
    /// The sums over `days`.
    pub totals: ChartTotals,
}

/// A route handler for the daily income and expense series of one of the
/// caller's accounts.
pub async fn get_account_chart_endpoint(
    State(state): State<ChartState>,
    Extension(user_id): Extension<UserID>,
    ApiPath(account_id): ApiPath<AccountId>,
    ApiQuery(query): ApiQuery<ChartQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    // Checks ownership.
    get_account(account_id, user_id, &connection)?;
    let transactions = get_account_transactions(account_id, &connection)?;
    drop(connection);

    let days: Vec<DailySummary> =
        aggregate_by_day(&transactions, query.range.window_days(), today)?.collect();
    let totals = summarise(&days)?;

    Ok(success(ChartData {
        range: query.range,
        days,
        totals,
    }))
}
