mod core;
mod create_endpoint;
mod default_endpoint;
mod list_endpoint;
mod state;
mod view_endpoint;

pub use core::{
    ACCOUNT_COLUMNS, Account, AccountDraft, AccountKind, AccountSummary, count_accounts,
    create_account_table, get_account, get_accounts_with_counts, map_row_to_account,
};
pub use create_endpoint::create_account_endpoint;
pub use default_endpoint::set_default_account_endpoint;
pub use list_endpoint::get_accounts_endpoint;
pub use state::AccountState;
pub use view_endpoint::{AccountWithTransactions, get_account_endpoint};
