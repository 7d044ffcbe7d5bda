//! Creating, editing and deleting transactions together with their balance changes.

use std::collections::{BTreeMap, BTreeSet};

use rusqlite::{Connection, TransactionBehavior, params};
use rust_decimal::Decimal;

use crate::{
    Error, Transaction, TransactionDraft, UserID,
    account::get_account,
    database_id::{AccountId, TransactionId},
    ledger::{
        balance_delta,
        delta::{apply_balance_delta, overflow_error, reversal_deltas},
    },
    money::to_sql_text,
    transaction::{TRANSACTION_COLUMNS, get_transaction, map_transaction_row},
};

/// Record a new transaction and apply its delta to the account balance.
///
/// # Errors
/// This function will return a:
/// - [Error::Invalid] if the draft is invalid (see [TransactionDraft::validate]),
/// - [Error::NotFound] if the draft's account does not belong to `user_id`,
/// - or [Error::SqlError] if there is an SQL error.
///
/// Nothing is written if an error is returned.
pub fn create_transaction(
    draft: TransactionDraft,
    user_id: UserID,
    connection: &mut Connection,
) -> Result<Transaction, Error> {
    let recurrence = draft.validate()?;

    let db_transaction = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let account = get_account(draft.account_id, user_id, &db_transaction)?;

    let transaction = db_transaction
        .prepare(&format!(
            "INSERT INTO \"transaction\" (user_id, account_id, type, amount, date, description,
                category, status, is_recurring, recurring_interval, next_recurring_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            params![
                user_id.as_i64(),
                account.id,
                draft.transaction_type,
                to_sql_text(draft.amount),
                draft.date,
                draft.description,
                draft.category,
                draft.status,
                draft.is_recurring,
                recurrence.interval,
                recurrence.next_date,
            ],
            map_transaction_row,
        )?;

    apply_balance_delta(account.id, transaction.balance_delta(), &db_transaction)?;

    db_transaction.commit()?;

    tracing::info!(
        "User {user_id} recorded transaction {} on account {}",
        transaction.id,
        account.id
    );

    Ok(transaction)
}

/// Replace the fields of transaction `id` and move the account balances by
/// the difference between the old and new deltas.
///
/// If the transaction moves to another account, the old account loses the old
/// delta and the new account gains the new delta. Balances are updated in
/// ascending account ID order.
///
/// # Errors
/// This function will return a:
/// - [Error::Invalid] if the draft is invalid or a balance would overflow,
/// - [Error::NotFound] if the transaction or the draft's account does not belong to `user_id`,
/// - or [Error::SqlError] if there is an SQL error.
///
/// Nothing is written if an error is returned.
pub fn update_transaction(
    id: TransactionId,
    draft: TransactionDraft,
    user_id: UserID,
    connection: &mut Connection,
) -> Result<Transaction, Error> {
    let recurrence = draft.validate()?;

    let db_transaction = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let existing = get_transaction(id, user_id, &db_transaction)?;
    let account = get_account(draft.account_id, user_id, &db_transaction)?;

    let old_delta = existing.balance_delta();
    let new_delta = balance_delta(draft.transaction_type, draft.status, draft.amount);

    let mut adjustments: BTreeMap<AccountId, Decimal> = BTreeMap::new();
    adjustments.insert(existing.account_id, -old_delta);
    let adjustment = adjustments.entry(account.id).or_default();
    *adjustment = adjustment
        .checked_add(new_delta)
        .ok_or_else(|| overflow_error(account.id))?;

    let updated = db_transaction
        .prepare(&format!(
            "UPDATE \"transaction\"
            SET account_id = ?1, type = ?2, amount = ?3, date = ?4, description = ?5,
                category = ?6, status = ?7, is_recurring = ?8, recurring_interval = ?9,
                next_recurring_date = ?10
            WHERE id = ?11 AND user_id = ?12
            RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            params![
                account.id,
                draft.transaction_type,
                to_sql_text(draft.amount),
                draft.date,
                draft.description,
                draft.category,
                draft.status,
                draft.is_recurring,
                recurrence.interval,
                recurrence.next_date,
                existing.id,
                user_id.as_i64(),
            ],
            map_transaction_row,
        )?;

    for (account_id, delta) in adjustments {
        if !delta.is_zero() {
            apply_balance_delta(account_id, delta, &db_transaction)?;
        }
    }

    db_transaction.commit()?;

    tracing::info!("User {user_id} updated transaction {id}");

    Ok(updated)
}

/// Delete the transactions in `ids` that belong to `user_id` and undo their
/// balance changes.
///
/// IDs that do not exist or belong to another user are skipped without an
/// error. The deletions and the balance changes for every affected account are
/// committed together.
///
/// Returns the number of deleted transactions, which is zero if none matched.
///
/// # Errors
/// This function will return a:
/// - [Error::Invalid] if undoing the deltas would overflow a balance,
/// - or [Error::SqlError] if there is an SQL error.
///
/// Nothing is written if an error is returned.
pub fn bulk_delete_transactions(
    ids: &[TransactionId],
    user_id: UserID,
    connection: &mut Connection,
) -> Result<usize, Error> {
    let db_transaction = connection.transaction_with_behavior(TransactionBehavior::Immediate)?;

    let mut transactions = Vec::new();
    for id in ids.iter().copied().collect::<BTreeSet<_>>() {
        match get_transaction(id, user_id, &db_transaction) {
            Ok(transaction) => transactions.push(transaction),
            Err(Error::NotFound) => {
                tracing::debug!("Skipping transaction {id}, not found for user {user_id}")
            }
            Err(error) => return Err(error),
        }
    }

    if transactions.is_empty() {
        return Ok(0);
    }

    let reversals = reversal_deltas(&transactions)?;

    for transaction in &transactions {
        db_transaction.execute(
            "DELETE FROM \"transaction\" WHERE id = ?1 AND user_id = ?2",
            (transaction.id, user_id.as_i64()),
        )?;
    }

    for (account_id, reversal) in reversals {
        if !reversal.is_zero() {
            apply_balance_delta(account_id, reversal, &db_transaction)?;
        }
    }

    db_transaction.commit()?;

    tracing::info!(
        "User {user_id} deleted {} of {} requested transactions",
        transactions.len(),
        ids.len()
    );

    Ok(transactions.len())
}
