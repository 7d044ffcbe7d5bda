//! Opening accounts and moving the default account flag.

use rusqlite::{Connection, TransactionBehavior, params};

use crate::{
    Account, AccountDraft, Error, UserID,
    account::{ACCOUNT_COLUMNS, count_accounts, get_account, map_row_to_account},
    database_id::AccountId,
    money::to_sql_text,
};

/// Open a new account for `user_id` with the draft's opening balance.
///
/// A user's first account always becomes their default account, whatever the
/// draft asks for. If the new account becomes the default, the previous
/// default account loses the flag in the same database transaction.
///
/// # Errors
/// This function will return a:
/// - [Error::Invalid] if the draft is invalid,
/// - or [Error::SqlError] if there is an SQL error, in which case nothing is written.
pub fn create_account(
    draft: AccountDraft,
    user_id: UserID,
    connection: &mut Connection,
) -> Result<Account, Error> {
    draft.validate()?;

    let transaction = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let is_default = draft.is_default || count_accounts(user_id, &transaction)? == 0;

    if is_default {
        clear_default_account(user_id, &transaction)?;
    }

    let account = transaction
        .prepare(&format!(
            "INSERT INTO account (user_id, name, kind, balance, is_default)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING {ACCOUNT_COLUMNS}"
        ))?
        .query_row(
            params![
                user_id.as_i64(),
                draft.name.trim(),
                draft.kind,
                to_sql_text(draft.balance),
                is_default,
            ],
            map_row_to_account,
        )?;

    transaction.commit()?;

    tracing::info!(
        "User {user_id} opened account {} (default: {is_default})",
        account.id
    );

    Ok(account)
}

/// Make `account_id` the default account of `user_id`.
///
/// All of the user's accounts lose the flag and then the target gains it, in
/// one database transaction. Calling this again with the same account leaves
/// the state unchanged.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the account does not belong to `user_id`,
/// - or [Error::SqlError] if there is an SQL error, in which case nothing is written.
pub fn set_default_account(
    account_id: AccountId,
    user_id: UserID,
    connection: &mut Connection,
) -> Result<Account, Error> {
    let transaction = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let account = get_account(account_id, user_id, &transaction)?;

    clear_default_account(user_id, &transaction)?;
    transaction.execute(
        "UPDATE account SET is_default = 1 WHERE id = ?1",
        (account.id,),
    )?;

    transaction.commit()?;

    tracing::info!("User {user_id} set account {account_id} as their default account");

    Ok(Account {
        is_default: true,
        ..account
    })
}

fn clear_default_account(user_id: UserID, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "UPDATE account SET is_default = 0 WHERE user_id = ?1 AND is_default = 1",
        (user_id.as_i64(),),
    )?;

    Ok(())
}
