//! Transaction management for the ledger.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the `TransactionDraft` request body
//! - The recurring schedule calculator
//! - Database functions for querying transactions
//! - Route handlers for the transaction API
//!
//! Functions that change transactions live in [crate::ledger] so that every
//! change is paired with its balance adjustment.

mod bulk_delete_endpoint;
mod core;
mod create_endpoint;
mod draft;
mod edit_endpoint;
mod get_endpoint;
mod recurring;

pub use bulk_delete_endpoint::bulk_delete_transactions_endpoint;
pub use core::{
    TRANSACTION_COLUMNS, Transaction, TransactionStatus, TransactionType,
    create_transaction_table, get_account_transactions, get_transaction, get_user_transactions,
    map_transaction_row,
};
pub use create_endpoint::create_transaction_endpoint;
pub use draft::{Recurrence, TransactionDraft};
pub use edit_endpoint::edit_transaction_endpoint;
pub use get_endpoint::{get_transaction_endpoint, get_transactions_endpoint};
pub use recurring::{RecurringInterval, advance};

#[cfg(test)]
pub use core::count_transactions;
