//! Defines the endpoint for editing a transaction.

use axum::{Extension, extract::State, response::Response};

use crate::{
    Error, TransactionDraft, UserID,
    database_id::TransactionId,
    extract::{ApiJson, ApiPath},
    ledger::update_transaction,
    response::success,
    transaction::get_endpoint::TransactionState,
};

/// A route handler for replacing the fields of one of the caller's
/// transactions, adjusting the affected account balances.
///
/// Responds with the updated transaction.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    ApiPath(transaction_id): ApiPath<TransactionId>,
    ApiJson(draft): ApiJson<TransactionDraft>,
) -> Result<Response, Error> {
    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = update_transaction(transaction_id, draft, user_id, &mut connection)?;

    Ok(success(transaction))
}
