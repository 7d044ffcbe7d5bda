//! Defines the account model and the database queries for reading accounts.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Error, UserID, database_id::AccountId, money::decimal_column};

// ============================================================================
// MODELS
// ============================================================================

/// The kind of bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountKind {
    /// An everyday transaction account.
    Current,
    /// A savings account.
    Savings,
}

impl AccountKind {
    fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Current => "CURRENT",
            AccountKind::Savings => "SAVINGS",
        }
    }
}

impl Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CURRENT" => Ok(AccountKind::Current),
            "SAVINGS" => Ok(AccountKind::Savings),
            other => Err(Error::Invalid(format!("unknown account kind \"{other}\""))),
        }
    }
}

impl ToSql for AccountKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for AccountKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// A named bucket of money with a running balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// The id for the account.
    pub id: AccountId,
    /// The user that owns the account.
    pub user_id: UserID,
    /// The display name of the account.
    pub name: String,
    /// Whether this is a current or savings account.
    pub kind: AccountKind,
    /// The current balance.
    ///
    /// Only the reconciliation functions in [crate::ledger] write this field.
    pub balance: Decimal,
    /// Whether new transactions go to this account when none is specified.
    pub is_default: bool,
}

/// The fields needed to open a new account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccountDraft {
    /// The display name of the account.
    pub name: String,
    /// Whether this is a current or savings account.
    pub kind: AccountKind,
    /// The opening balance, may be negative (e.g. an overdrawn account).
    pub balance: Decimal,
    /// Whether the account should become the default account.
    ///
    /// Ignored for a user's first account, which is always the default.
    #[serde(default)]
    pub is_default: bool,
}

impl AccountDraft {
    /// Check the draft can be stored.
    ///
    /// # Errors
    /// Returns [Error::Invalid] if the name is blank.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::Invalid("account name cannot be empty".to_owned()));
        }

        Ok(())
    }
}

/// An account together with how many transactions reference it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    /// The account.
    #[serde(flatten)]
    pub account: Account,
    /// The number of transactions recorded against the account.
    pub transaction_count: i64,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the account table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            name TEXT NOT NULL,
            kind TEXT NOT NULL,
            balance TEXT NOT NULL,
            is_default INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_account_user ON account(user_id);",
        (),
    )?;

    Ok(())
}

/// The columns selected by [map_row_to_account], in order.
pub const ACCOUNT_COLUMNS: &str = "id, user_id, name, kind, balance, is_default";

/// Map a database row to an [Account].
pub fn map_row_to_account(row: &Row) -> Result<Account, rusqlite::Error> {
    Ok(Account {
        id: row.get(0)?,
        user_id: UserID::new(row.get(1)?),
        name: row.get(2)?,
        kind: row.get(3)?,
        balance: decimal_column(row, 4)?,
        is_default: row.get(5)?,
    })
}

/// Retrieve the account `id` owned by `user_id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to an account owned by `user_id`,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_account(
    id: AccountId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Account, Error> {
    connection
        .prepare(&format!(
            "SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = :id AND user_id = :user_id"
        ))?
        .query_one(
            &[(":id", &id), (":user_id", &user_id.as_i64())],
            map_row_to_account,
        )
        .map_err(Error::from)
}

/// Get all the accounts owned by `user_id`, most recently created first, with
/// the number of transactions in each.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_accounts_with_counts(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<AccountSummary>, Error> {
    connection
        .prepare(
            "SELECT a.id, a.user_id, a.name, a.kind, a.balance, a.is_default,
                (SELECT COUNT(t.id) FROM \"transaction\" t WHERE t.account_id = a.id)
            FROM account a
            WHERE a.user_id = :user_id
            ORDER BY a.id DESC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], |row| {
            Ok(AccountSummary {
                account: map_row_to_account(row)?,
                transaction_count: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Count the accounts owned by `user_id`.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn count_accounts(user_id: UserID, connection: &Connection) -> Result<i64, Error> {
    connection
        .query_row(
            "SELECT COUNT(id) FROM account WHERE user_id = ?1",
            (user_id.as_i64(),),
            |row| row.get(0),
        )
        .map_err(Error::from)
}
