//! Conversions between [Decimal] amounts and their stored representation.
//!
//! Amounts and balances are kept as canonical decimal text in SQLite so that
//! no value ever passes through binary floating point.

use std::str::FromStr;

use rust_decimal::Decimal;
use rusqlite::Row;

use crate::Error;

/// Format `amount` for storage, keeping its scale (e.g. "150.00").
pub fn to_sql_text(amount: Decimal) -> String {
    amount.to_string()
}

/// Read the decimal stored in column `index` of `row`.
///
/// # Errors
/// Returns a [rusqlite::Error::FromSqlConversionFailure] if the stored text is
/// not a decimal number.
pub fn decimal_column(row: &Row, index: usize) -> Result<Decimal, rusqlite::Error> {
    let text: String = row.get(index)?;

    Decimal::from_str(&text).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(index, rusqlite::types::Type::Text, Box::new(error))
    })
}

/// Parse a decimal amount supplied by a client.
///
/// # Errors
/// Returns [Error::Invalid] if `text` is not a decimal number.
pub fn parse_amount(text: &str) -> Result<Decimal, Error> {
    Decimal::from_str(text.trim())
        .map_err(|_| Error::Invalid(format!("\"{text}\" is not a valid amount")))
}
