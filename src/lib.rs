//! Welth is a personal finance service for tracking accounts, income and
//! expenses.
//!
//! This library keeps every account's stored balance consistent with the
//! transactions recorded against it, and serves the ledger over a JSON API.
//! The reconciliation rules live in [ledger]; the HTTP surface is assembled by
//! [build_router].

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod account;
mod app_state;
mod auth;
mod dashboard;
mod database_id;
mod db;
pub mod endpoints;
mod extract;
mod gate;
pub mod ledger;
mod logging;
mod money;
mod receipt;
mod response;
mod routing;
mod timezone;
mod transaction;
mod user;

#[cfg(test)]
mod test_utils;

pub use account::{
    Account, AccountDraft, AccountKind, AccountSummary, AccountWithTransactions,
};
pub use app_state::AppState;
pub use auth::{AuthState, COOKIE_TOKEN, set_auth_cookie};
pub use dashboard::{
    ChartData, ChartTotals, DailySummary, DateRange, aggregate_by_day, summarise,
};
pub use database_id::{AccountId, TransactionId};
pub use db::initialize as initialize_db;
pub use gate::{GateDecision, RequestGate, TokenBucketGate};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use receipt::{
    EXPENSE_CATEGORIES, FALLBACK_CATEGORY, ReceiptImage, ReceiptScanner, ReceiptState,
    ReceiptSuggestion, UnconfiguredReceiptScanner, parse_receipt_response,
};
pub use response::ErrorKind;
pub use routing::build_router;
pub use transaction::{
    Recurrence, RecurringInterval, Transaction, TransactionDraft, TransactionStatus,
    TransactionType, advance,
};
pub use user::{User, UserID, create_user, get_user_by_id};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("Could not listen for the Ctrl+C signal: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("Could not install the terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request did not carry a valid caller identity.
    #[error("the caller could not be identified")]
    Unauthorized,

    /// The referenced account or transaction does not exist or is not owned
    /// by the caller.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The request was malformed, e.g. a non-positive amount, an unknown enum
    /// value or a missing field.
    #[error("invalid request: {0}")]
    Invalid(String),

    /// The abuse-protection gate rejected the request because the caller has
    /// made too many requests.
    #[error("too many requests, try again in {reset_in_seconds} seconds")]
    RateLimited {
        /// The number of requests the caller may still make in this window.
        remaining: u32,
        /// Seconds until the caller's allowance is refilled.
        reset_in_seconds: u64,
    },

    /// The abuse-protection gate rejected the request outright.
    #[error("request blocked")]
    Blocked,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The receipt could not be scanned or the scanner's response could not
    /// be understood.
    #[error("could not scan receipt: {0}")]
    ReceiptScan(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// The category of the error as reported to API clients.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Unauthorized => ErrorKind::Unauthorized,
            Error::NotFound => ErrorKind::NotFound,
            Error::Invalid(_) => ErrorKind::Invalid,
            Error::RateLimited { .. } => ErrorKind::RateLimited,
            Error::Blocked => ErrorKind::Blocked,
            Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::InvalidTimezoneError(_) => ErrorKind::StoreFailure,
            Error::ReceiptScan(_) => ErrorKind::ReceiptScan,
        }
    }

    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Invalid => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ErrorKind::Blocked => StatusCode::FORBIDDEN,
            ErrorKind::StoreFailure => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::ReceiptScan => StatusCode::BAD_GATEWAY,
        }
    }

    /// The message shown to the client.
    ///
    /// Store failures are logged in full on the server and replaced with a
    /// generic message for the client.
    fn client_message(&self) -> String {
        match self.kind() {
            ErrorKind::StoreFailure => {
                tracing::error!("An unexpected error occurred: {}", self);
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        let body = response::Failure::new(self.kind(), self.client_message());

        (status_code, Json(body)).into_response()
    }
}
