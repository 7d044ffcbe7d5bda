//! Defines the endpoint for deleting many transactions at once.

use axum::{Extension, extract::State, response::Response};
use serde::{Deserialize, Serialize};

use crate::{
    Error, UserID, database_id::TransactionId, extract::ApiJson,
    ledger::bulk_delete_transactions, response::success,
    transaction::get_endpoint::TransactionState,
};

/// The request body for a bulk delete.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BulkDeleteRequest {
    /// The transactions to delete. IDs the caller does not own are skipped.
    pub ids: Vec<TransactionId>,
}

/// The result of a bulk delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteResult {
    /// How many transactions were deleted.
    pub deleted: usize,
}

/// A route handler for deleting the caller's transactions among `ids` and
/// reversing their effect on account balances.
pub async fn bulk_delete_transactions_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    ApiJson(request): ApiJson<BulkDeleteRequest>,
) -> Result<Response, Error> {
    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let deleted = bulk_delete_transactions(&request.ids, user_id, &mut connection)?;

    Ok(success(BulkDeleteResult { deleted }))
}
