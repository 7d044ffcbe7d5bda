//! Defines the endpoint for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, RequestGate, TransactionDraft, UserID,
    endpoints::{self, format_endpoint},
    extract::ApiJson,
    ledger::create_transaction,
    response::success_with_status,
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The gate that limits how often a user may create transactions.
    pub gate: Arc<dyn RequestGate>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            gate: state.gate.clone(),
        }
    }
}

/// A route handler for recording a new transaction.
///
/// The gate is consulted before the database is touched. Responds with
/// 201 Created, the stored transaction and its location.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(user_id): Extension<UserID>,
    ApiJson(draft): ApiJson<TransactionDraft>,
) -> Result<Response, Error> {
    state.gate.check(user_id).into_result()?;

    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction = create_transaction(draft, user_id, &mut connection)?;
    let location = format_endpoint(endpoints::TRANSACTION, transaction.id);

    Ok((
        [(LOCATION, location)],
        success_with_status(StatusCode::CREATED, transaction),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::{
        sync::{Arc, Mutex},
        time::Duration,
    };

    use axum::{
        Extension,
        extract::State,
        http::{StatusCode, header::LOCATION},
    };
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error, TokenBucketGate, Transaction, UserID,
        account::get_account,
        extract::ApiJson,
        test_utils::{
            expense, get_test_connection, must_create_account, must_create_user, parse_success,
        },
        transaction::{
            count_transactions, create_endpoint::CreateTransactionState,
            create_transaction_endpoint,
        },
    };

    fn get_state(
        conn: rusqlite::Connection,
        capacity: u32,
        blocked: &[UserID],
    ) -> CreateTransactionState {
        CreateTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
            gate: Arc::new(TokenBucketGate::new(
                capacity,
                Duration::from_secs(3600),
                blocked.iter().copied(),
            )),
        }
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let mut conn = get_test_connection();
        let user = must_create_user("owner", &conn);
        let account = must_create_account(user.id, dec!(1000.00), &mut conn);
        let state = get_state(conn, 10, &[]);

        let response = create_transaction_endpoint(
            State(state.clone()),
            Extension(user.id),
            ApiJson(expense(account.id, dec!(150.00), date!(2025 - 10 - 05))),
        )
        .await
        .unwrap();

        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "/api/transactions/1"
        );
        let transaction: Transaction = parse_success(response, StatusCode::CREATED).await;
        assert_eq!(transaction.amount, dec!(150.00));
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            get_account(account.id, user.id, &connection).unwrap().balance,
            dec!(850.00)
        );
    }

    #[tokio::test]
    async fn rate_limited_request_does_not_touch_the_store() {
        let mut conn = get_test_connection();
        let user = must_create_user("owner", &conn);
        let account = must_create_account(user.id, dec!(100), &mut conn);
        let state = get_state(conn, 1, &[]);
        let draft = expense(account.id, dec!(10), date!(2025 - 10 - 05));

        create_transaction_endpoint(
            State(state.clone()),
            Extension(user.id),
            ApiJson(draft.clone()),
        )
        .await
        .unwrap();
        let result =
            create_transaction_endpoint(State(state.clone()), Extension(user.id), ApiJson(draft))
                .await;

        assert!(matches!(result, Err(Error::RateLimited { remaining: 0, .. })));
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection).unwrap(), 1);
        assert_eq!(
            get_account(account.id, user.id, &connection).unwrap().balance,
            dec!(90)
        );
    }

    #[tokio::test]
    async fn blocked_user_is_rejected() {
        let mut conn = get_test_connection();
        let user = must_create_user("owner", &conn);
        let account = must_create_account(user.id, dec!(100), &mut conn);
        let state = get_state(conn, 10, &[user.id]);

        let result = create_transaction_endpoint(
            State(state.clone()),
            Extension(user.id),
            ApiJson(expense(account.id, dec!(10), date!(2025 - 10 - 05))),
        )
        .await;

        assert!(matches!(result, Err(Error::Blocked)));
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(count_transactions(&connection).unwrap(), 0);
    }
}
