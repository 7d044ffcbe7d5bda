//! Defines the endpoint for viewing one account and its transactions.

use axum::{Extension, extract::State, response::Response};
use serde::{Deserialize, Serialize};

use crate::{
    Account, Error, Transaction, UserID,
    account::{AccountState, get_account},
    database_id::AccountId,
    extract::ApiPath,
    response::success,
    transaction::get_account_transactions,
};

/// An account with all of its transactions, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountWithTransactions {
    /// The account.
    #[serde(flatten)]
    pub account: Account,
    /// The account's transactions ordered by date, newest first.
    pub transactions: Vec<Transaction>,
}

/// A route handler for getting an account owned by the caller together with
/// its transactions.
pub async fn get_account_endpoint(
    State(state): State<AccountState>,
    Extension(user_id): Extension<UserID>,
    ApiPath(account_id): ApiPath<AccountId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let account = get_account(account_id, user_id, &connection)?;
    let transactions = get_account_transactions(account.id, &connection)?;

    Ok(success(AccountWithTransactions {
        account,
        transactions,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, http::StatusCode};
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error,
        account::{AccountState, AccountWithTransactions, get_account_endpoint},
        extract::ApiPath,
        ledger::create_transaction,
        test_utils::{
            expense, get_test_connection, must_create_account, must_create_user, parse_success,
        },
    };

    #[tokio::test]
    async fn returns_transactions_newest_first() {
        let mut conn = get_test_connection();
        let user = must_create_user("owner", &conn);
        let account = must_create_account(user.id, dec!(100), &mut conn);
        for date in [date!(2025 - 10 - 01), date!(2025 - 10 - 03), date!(2025 - 10 - 02)] {
            create_transaction(expense(account.id, dec!(5), date), user.id, &mut conn).unwrap();
        }
        let state = AccountState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response =
            get_account_endpoint(State(state), Extension(user.id), ApiPath(account.id))
                .await
                .unwrap();

        let view: AccountWithTransactions = parse_success(response, StatusCode::OK).await;
        assert_eq!(view.account.balance, dec!(85));
        assert_eq!(
            view.transactions
                .iter()
                .map(|transaction| transaction.date)
                .collect::<Vec<_>>(),
            vec![date!(2025 - 10 - 03), date!(2025 - 10 - 02), date!(2025 - 10 - 01)]
        );
    }

    #[tokio::test]
    async fn someone_elses_account_is_not_found() {
        let mut conn = get_test_connection();
        let user = must_create_user("owner", &conn);
        let other = must_create_user("other", &conn);
        let theirs = must_create_account(other.id, dec!(100), &mut conn);
        let state = AccountState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let result =
            get_account_endpoint(State(state), Extension(user.id), ApiPath(theirs.id)).await;

        assert!(matches!(result, Err(Error::NotFound)));
    }
}
