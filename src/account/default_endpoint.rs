//! Defines the endpoint for choosing the default account.

use axum::{Extension, extract::State, response::Response};

use crate::{
    Error, UserID, account::AccountState, database_id::AccountId, extract::ApiPath,
    ledger::set_default_account, response::success,
};

/// A route handler for making an account the caller's default account.
///
/// Responds with the updated account.
pub async fn set_default_account_endpoint(
    State(state): State<AccountState>,
    Extension(user_id): Extension<UserID>,
    ApiPath(account_id): ApiPath<AccountId>,
) -> Result<Response, Error> {
    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let account = set_default_account(account_id, user_id, &mut connection)?;

    Ok(success(account))
}
