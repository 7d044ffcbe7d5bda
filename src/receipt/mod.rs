//! Receipt scanning.
//!
//! A photo of a receipt is passed to a [ReceiptScanner] and the provider's
//! answer is turned into a [ReceiptSuggestion] that a client can use to
//! prefill a new expense. Scanning never writes to the ledger.

mod scan_endpoint;
mod scanner;
mod suggestion;

pub use scan_endpoint::{MAX_RECEIPT_BYTES, ReceiptState, scan_receipt_endpoint};
pub use scanner::{ReceiptImage, ReceiptScanner, UnconfiguredReceiptScanner};
pub use suggestion::{
    EXPENSE_CATEGORIES, FALLBACK_CATEGORY, ReceiptSuggestion, parse_receipt_response,
};
