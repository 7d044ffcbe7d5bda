#![allow(missing_docs)]

pub(crate) mod http;

use rusqlite::Connection;
use rust_decimal::Decimal;
use time::Date;

use crate::{
    Account, AccountDraft, AccountKind, TransactionDraft, TransactionStatus, TransactionType,
    User, UserID, create_user, db::initialize, database_id::AccountId, ledger::create_account,
};

pub(crate) use http::{
    assert_status_ok, get_test_server, get_test_state, get_test_state_with_gate, log_in,
    parse_success,
};

#[track_caller]
pub(crate) fn get_test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}

#[track_caller]
pub(crate) fn must_create_user(external_id: &str, connection: &Connection) -> User {
    create_user(external_id, connection).expect("Could not create test user")
}

#[track_caller]
pub(crate) fn must_create_account(
    user_id: UserID,
    balance: Decimal,
    connection: &mut Connection,
) -> Account {
    create_account(
        AccountDraft {
            name: "Everyday".to_owned(),
            kind: AccountKind::Current,
            balance,
            is_default: false,
        },
        user_id,
        connection,
    )
    .expect("Could not create test account")
}

/// A completed, non-recurring expense draft.
pub(crate) fn expense(account_id: AccountId, amount: Decimal, date: Date) -> TransactionDraft {
    TransactionDraft {
        account_id,
        transaction_type: TransactionType::Expense,
        amount,
        date,
        description: "test transaction".to_owned(),
        category: "food".to_owned(),
        status: TransactionStatus::Completed,
        is_recurring: false,
        recurring_interval: None,
    }
}
