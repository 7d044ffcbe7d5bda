//! Defines the endpoints for reading transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::Response,
};
use rusqlite::Connection;

use crate::{
    AppState, Error, UserID,
    database_id::TransactionId,
    extract::ApiPath,
    response::success,
    transaction::{get_transaction, get_user_transactions},
};

/// The state needed to read, edit or delete transactions.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for getting one of the caller's transactions.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
    ApiPath(transaction_id): ApiPath<TransactionId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = get_transaction(transaction_id, user_id, &connection)?;

    Ok(success(transaction))
}

/// A route handler for listing all of the caller's transactions, newest first.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_user_transactions(user_id, &connection)?;

    Ok(success(transactions))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, http::StatusCode};
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error, Transaction,
        extract::ApiPath,
        ledger::create_transaction,
        test_utils::{
            expense, get_test_connection, must_create_account, must_create_user, parse_success,
        },
        transaction::{
            get_endpoint::TransactionState, get_transaction_endpoint, get_transactions_endpoint,
        },
    };

    #[tokio::test]
    async fn gets_own_transaction_but_not_others() {
        let mut conn = get_test_connection();
        let user = must_create_user("owner", &conn);
        let other = must_create_user("other", &conn);
        let account = must_create_account(user.id, dec!(0), &mut conn);
        let transaction = create_transaction(
            expense(account.id, dec!(3.20), date!(2025 - 10 - 05)),
            user.id,
            &mut conn,
        )
        .unwrap();
        let state = TransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = get_transaction_endpoint(
            State(state.clone()),
            Extension(user.id),
            ApiPath(transaction.id),
        )
        .await
        .unwrap();
        let got: Transaction = parse_success(response, StatusCode::OK).await;
        assert_eq!(got, transaction);

        let result =
            get_transaction_endpoint(State(state), Extension(other.id), ApiPath(transaction.id))
                .await;
        assert!(matches!(result, Err(Error::NotFound)));
    }

    #[tokio::test]
    async fn lists_transactions_across_accounts_newest_first() {
        let mut conn = get_test_connection();
        let user = must_create_user("owner", &conn);
        let first = must_create_account(user.id, dec!(0), &mut conn);
        let second = must_create_account(user.id, dec!(0), &mut conn);
        create_transaction(
            expense(first.id, dec!(1), date!(2025 - 10 - 01)),
            user.id,
            &mut conn,
        )
        .unwrap();
        create_transaction(
            expense(second.id, dec!(2), date!(2025 - 10 - 02)),
            user.id,
            &mut conn,
        )
        .unwrap();
        let state = TransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = get_transactions_endpoint(State(state), Extension(user.id))
            .await
            .unwrap();

        let got: Vec<Transaction> = parse_success(response, StatusCode::OK).await;
        assert_eq!(
            got.iter().map(|t| t.account_id).collect::<Vec<_>>(),
            vec![second.id, first.id]
        );
    }
}
