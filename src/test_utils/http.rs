use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    body::Body,
    http::StatusCode,
    response::Response,
    routing::post,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Cookie};
use axum_test::TestServer;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use time::UtcOffset;

use crate::{
    AppState, Error, TokenBucketGate, UnconfiguredReceiptScanner, UserID,
    auth::{COOKIE_TOKEN, set_auth_cookie},
    build_router,
    extract::ApiPath,
    response::Success,
};

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::OK);
}

/// An [AppState] over `connection` with a generous rate limit and no receipt scanner.
pub(crate) fn get_test_state(connection: Connection) -> AppState {
    get_test_state_with_gate(connection, TokenBucketGate::new(100, Duration::from_secs(3600), []))
}

pub(crate) fn get_test_state_with_gate(connection: Connection, gate: TokenBucketGate) -> AppState {
    AppState::new(
        connection,
        "42",
        "Etc/UTC",
        Arc::new(gate),
        Arc::new(UnconfiguredReceiptScanner),
    )
    .expect("Could not create test state")
}

/// Read the `data` of a success envelope, panicking if the status is not `want_status`.
pub(crate) async fn parse_success<T: DeserializeOwned>(
    response: Response,
    want_status: StatusCode,
) -> T {
    assert_eq!(response.status(), want_status);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");
    let success: Success<T> =
        serde_json::from_slice(&body).expect("Response was not a success envelope");

    success.data
}

const TEST_LOG_IN_ROUTE: &str = "/test/log_in/{user_id}";

async fn stub_log_in(
    jar: PrivateCookieJar,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<PrivateCookieJar, Error> {
    set_auth_cookie(
        jar,
        UserID::new(user_id),
        time::Duration::minutes(5),
        UtcOffset::UTC,
    )
}

/// A server for the full app router plus a route that logs in any user.
pub(crate) fn get_test_server(state: AppState) -> TestServer {
    let log_in = Router::new()
        .route(TEST_LOG_IN_ROUTE, post(stub_log_in))
        .with_state(state.clone());
    let app = build_router(state).merge(log_in);

    TestServer::try_new(app).expect("Could not create test server.")
}

/// Get an auth cookie for `user_id` from a server built by [get_test_server].
pub(crate) async fn log_in(server: &TestServer, user_id: UserID) -> Cookie<'static> {
    server
        .post(&TEST_LOG_IN_ROUTE.replace("{user_id}", &user_id.to_string()))
        .await
        .cookie(COOKIE_TOKEN)
}
