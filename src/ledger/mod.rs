//! The balance reconciliation engine.
//!
//! An account's stored balance must always equal its opening balance plus the
//! deltas of its completed transactions. Every function here that changes a
//! transaction also changes the affected balances, and commits both in a
//! single SQLite transaction opened with [rusqlite::TransactionBehavior::Immediate].
//! The write lock is therefore held from the moment a balance is read until the
//! new balance is committed, so concurrent operations on one account cannot
//! lose a delta.
//!
//! Nothing else in the crate writes to `account.balance`.

mod account;
mod delta;
mod transaction;

pub use account::{create_account, set_default_account};
pub use delta::{balance_delta, reversal_deltas};
pub use transaction::{bulk_delete_transactions, create_transaction, update_transaction};
