//! Balance deltas: the signed change a transaction makes to its account.

use std::collections::BTreeMap;

use rusqlite::Connection;
use rust_decimal::Decimal;

use crate::{
    Error, Transaction, TransactionStatus, TransactionType, database_id::AccountId,
    money::{decimal_column, to_sql_text},
};

/// The signed change a transaction makes to its account's balance.
///
/// Income adds `amount`, expenses subtract it. Transactions that have not
/// completed do not affect the balance.
pub fn balance_delta(
    transaction_type: TransactionType,
    status: TransactionStatus,
    amount: Decimal,
) -> Decimal {
    if status != TransactionStatus::Completed {
        return Decimal::ZERO;
    }

    match transaction_type {
        TransactionType::Income => amount,
        TransactionType::Expense => -amount,
    }
}

impl Transaction {
    /// The signed change this transaction makes to its account's balance.
    pub fn balance_delta(&self) -> Decimal {
        balance_delta(self.transaction_type, self.status, self.amount)
    }
}

/// Sum the balance changes needed to undo `transactions`, per account.
///
/// The map iterates in ascending account ID order, which is the order in
/// which balance updates are applied.
///
/// # Errors
/// Returns [Error::Invalid] if a sum overflows.
pub fn reversal_deltas<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
) -> Result<BTreeMap<AccountId, Decimal>, Error> {
    let mut reversals: BTreeMap<AccountId, Decimal> = BTreeMap::new();

    for transaction in transactions {
        let reversal = reversals.entry(transaction.account_id).or_default();
        *reversal = reversal
            .checked_sub(transaction.balance_delta())
            .ok_or_else(|| overflow_error(transaction.account_id))?;
    }

    Ok(reversals)
}

/// Add `delta` to the balance of `account_id`.
///
/// Must be called inside the same database transaction as the row change that
/// caused the delta, after the caller has checked the account's owner.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if the account does not exist,
/// - [Error::Invalid] if the new balance overflows,
/// - or [Error::SqlError] if there is some other SQL error.
pub(crate) fn apply_balance_delta(
    account_id: AccountId,
    delta: Decimal,
    connection: &Connection,
) -> Result<Decimal, Error> {
    let balance = connection.query_row(
        "SELECT balance FROM account WHERE id = ?1",
        (account_id,),
        |row| decimal_column(row, 0),
    )?;

    let new_balance = balance
        .checked_add(delta)
        .ok_or_else(|| overflow_error(account_id))?;

    connection.execute(
        "UPDATE account SET balance = ?1 WHERE id = ?2",
        (to_sql_text(new_balance), account_id),
    )?;

    tracing::debug!("Account {account_id} balance {balance} -> {new_balance}");

    Ok(new_balance)
}

pub(super) fn overflow_error(account_id: AccountId) -> Error {
    Error::Invalid(format!("the balance of account {account_id} would overflow"))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Transaction, TransactionStatus, TransactionType, UserID,
        ledger::{balance_delta, reversal_deltas},
    };

    fn transaction(
        account_id: i64,
        transaction_type: TransactionType,
        amount: Decimal,
    ) -> Transaction {
        Transaction {
            id: 1,
            user_id: UserID::new(1),
            account_id,
            transaction_type,
            amount,
            date: date!(2025 - 10 - 05),
            description: String::new(),
            category: "food".to_owned(),
            status: TransactionStatus::Completed,
            is_recurring: false,
            recurring_interval: None,
            next_recurring_date: None,
        }
    }

    #[test]
    fn income_adds_and_expense_subtracts() {
        let completed = TransactionStatus::Completed;

        assert_eq!(
            balance_delta(TransactionType::Income, completed, dec!(100.25)),
            dec!(100.25)
        );
        assert_eq!(
            balance_delta(TransactionType::Expense, completed, dec!(100.25)),
            dec!(-100.25)
        );
    }

    #[test]
    fn unsettled_transactions_have_no_delta() {
        for status in [TransactionStatus::Pending, TransactionStatus::Failed] {
            assert_eq!(
                balance_delta(TransactionType::Income, status, dec!(50)),
                Decimal::ZERO
            );
        }
    }

    #[test]
    fn reversals_are_grouped_and_ordered_by_account() {
        let transactions = vec![
            transaction(7, TransactionType::Expense, dec!(30)),
            transaction(2, TransactionType::Income, dec!(100)),
            transaction(7, TransactionType::Income, dec!(5.50)),
            transaction(2, TransactionType::Expense, dec!(0.10)),
        ];

        let reversals: Vec<_> = reversal_deltas(&transactions)
            .unwrap()
            .into_iter()
            .collect();

        assert_eq!(reversals, vec![(2, dec!(-99.90)), (7, dec!(24.50))]);
    }

    #[test]
    fn decimal_sums_are_exact() {
        let transactions: Vec<_> = (0..10)
            .map(|_| transaction(1, TransactionType::Expense, dec!(0.1)))
            .collect();

        let reversals = reversal_deltas(&transactions).unwrap();

        assert_eq!(reversals[&1], dec!(1.0));
    }
}
