//! Defines the endpoint for listing the caller's accounts.

use axum::{Extension, extract::State, response::Response};

use crate::{
    Error, UserID,
    account::{AccountState, get_accounts_with_counts},
    response::success,
};

/// A route handler for listing the caller's accounts, newest first, with the
/// number of transactions in each.
pub async fn get_accounts_endpoint(
    State(state): State<AccountState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let accounts = get_accounts_with_counts(user_id, &connection)?;

    Ok(success(accounts))
}
