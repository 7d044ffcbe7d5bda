//! Defines the endpoint for opening a new account.

use axum::{
    Extension,
    extract::State,
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

use crate::{
    AccountDraft, Error, UserID,
    account::AccountState,
    endpoints::{self, format_endpoint},
    extract::ApiJson,
    ledger::create_account,
    response::success_with_status,
};

/// A route handler for opening a new account.
///
/// Responds with 201 Created, the new account and its location.
pub async fn create_account_endpoint(
    State(state): State<AccountState>,
    Extension(user_id): Extension<UserID>,
    ApiJson(draft): ApiJson<AccountDraft>,
) -> Result<Response, Error> {
    let mut connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let account = create_account(draft, user_id, &mut connection)?;
    let location = format_endpoint(endpoints::ACCOUNT, account.id);

    Ok((
        [(LOCATION, location)],
        success_with_status(StatusCode::CREATED, account),
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::State,
        http::{StatusCode, header::LOCATION},
    };
    use rust_decimal_macros::dec;

    use crate::{
        Account, AccountDraft, AccountKind, ErrorKind,
        account::{AccountState, create_account_endpoint},
        extract::ApiJson,
        test_utils::{get_test_connection, must_create_user, parse_success},
    };

    fn draft(name: &str) -> AccountDraft {
        AccountDraft {
            name: name.to_owned(),
            kind: AccountKind::Savings,
            balance: dec!(-25.50),
            is_default: false,
        }
    }

    #[tokio::test]
    async fn creates_first_account_as_default() {
        let conn = get_test_connection();
        let user = must_create_user("owner", &conn);
        let state = AccountState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = create_account_endpoint(
            State(state),
            Extension(user.id),
            ApiJson(draft("Rainy day")),
        )
        .await
        .unwrap();

        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "/api/accounts/1"
        );
        let account: Account = parse_success(response, StatusCode::CREATED).await;
        assert_eq!(account.name, "Rainy day");
        assert_eq!(account.kind, AccountKind::Savings);
        assert_eq!(account.balance, dec!(-25.50));
        assert!(account.is_default);
    }

    #[tokio::test]
    async fn blank_name_is_invalid() {
        let conn = get_test_connection();
        let user = must_create_user("owner", &conn);
        let state = AccountState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let error =
            create_account_endpoint(State(state), Extension(user.id), ApiJson(draft(" ")))
                .await
                .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::Invalid);
    }
}
