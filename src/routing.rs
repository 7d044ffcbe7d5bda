//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};

use crate::{
    AppState, Error,
    account::{
        create_account_endpoint, get_account_endpoint, get_accounts_endpoint,
        set_default_account_endpoint,
    },
    auth::{auth_guard, get_log_out},
    dashboard::get_account_chart_endpoint,
    endpoints,
    receipt::{MAX_RECEIPT_BYTES, scan_receipt_endpoint},
    response::success_with_status,
    transaction::{
        bulk_delete_transactions_endpoint, create_transaction_endpoint,
        edit_transaction_endpoint, get_transaction_endpoint, get_transactions_endpoint,
    },
};

/// Room for the multipart boundaries and headers around a receipt image.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::LOG_OUT, get(get_log_out));

    let protected_routes = Router::new()
        .route(
            endpoints::ACCOUNTS,
            get(get_accounts_endpoint).post(create_account_endpoint),
        )
        .route(endpoints::ACCOUNT, get(get_account_endpoint))
        .route(
            endpoints::DEFAULT_ACCOUNT,
            put(set_default_account_endpoint),
        )
        .route(endpoints::ACCOUNT_CHART, get(get_account_chart_endpoint))
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint).put(edit_transaction_endpoint),
        )
        .route(
            endpoints::BULK_DELETE_TRANSACTIONS,
            post(bulk_delete_transactions_endpoint),
        )
        .route(
            endpoints::SCAN_RECEIPT,
            post(scan_receipt_endpoint).layer(DefaultBodyLimit::max(
                MAX_RECEIPT_BYTES + MULTIPART_OVERHEAD_BYTES,
            )),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    success_with_status(StatusCode::IM_A_TEAPOT, "I'm a teapot")
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
