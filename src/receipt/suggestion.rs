//! Interpreting the OCR provider's response as a transaction suggestion.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::{Date, macros::format_description};

use crate::{Error, money::parse_amount};

/// The categories a scanned receipt may be filed under.
pub const EXPENSE_CATEGORIES: [&str; 15] = [
    "housing",
    "transportation",
    "groceries",
    "utilities",
    "entertainment",
    "food",
    "shopping",
    "healthcare",
    "education",
    "personal",
    "travel",
    "insurance",
    "gifts",
    "bills",
    "other-expense",
];

/// The category used when the provider suggests one not in [EXPENSE_CATEGORIES].
pub const FALLBACK_CATEGORY: &str = "other-expense";

/// The fields read off a receipt, used to prefill a new expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptSuggestion {
    /// The receipt total, if it could be read.
    pub amount: Option<Decimal>,
    /// The date of purchase, if it could be read.
    pub date: Option<Date>,
    /// A short summary of what was bought.
    pub description: String,
    /// One of [EXPENSE_CATEGORIES].
    pub category: String,
    /// The store the receipt came from.
    pub merchant_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProviderReceipt {
    #[serde(default)]
    amount: Option<Value>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    merchant_name: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

/// Interpret the raw text returned by a receipt scanner.
///
/// Markdown code fences around the JSON are ignored. An empty JSON object
/// means the image was not a receipt and yields `Ok(None)`.
///
/// # Errors
/// Returns [Error::ReceiptScan] if the text is not a JSON object.
pub fn parse_receipt_response(text: &str) -> Result<Option<ReceiptSuggestion>, Error> {
    let cleaned = strip_code_fences(text);

    let value: Value = serde_json::from_str(&cleaned).map_err(|error| {
        tracing::debug!("could not parse receipt scanner response {text:?}: {error}");
        Error::ReceiptScan("invalid response format from receipt scanner".to_owned())
    })?;

    match &value {
        Value::Object(fields) if fields.is_empty() => return Ok(None),
        Value::Object(_) => {}
        _ => {
            return Err(Error::ReceiptScan(
                "receipt scanner response is not a JSON object".to_owned(),
            ));
        }
    }

    let receipt: ProviderReceipt = serde_json::from_value(value).map_err(|error| {
        tracing::debug!("unexpected receipt scanner fields in {text:?}: {error}");
        Error::ReceiptScan("invalid response format from receipt scanner".to_owned())
    })?;

    Ok(Some(ReceiptSuggestion {
        amount: receipt.amount.as_ref().and_then(parse_suggested_amount),
        date: receipt.date.as_deref().and_then(parse_suggested_date),
        description: receipt.description.unwrap_or_default(),
        category: validate_category(receipt.category.as_deref()),
        merchant_name: receipt.merchant_name.unwrap_or_default(),
    }))
}

fn strip_code_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim_start().starts_with("```"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_owned()
}

fn parse_suggested_amount(value: &Value) -> Option<Decimal> {
    let amount = match value {
        Value::Number(number) => parse_amount(&number.to_string()).ok()?,
        Value::String(text) => parse_amount(text).ok()?,
        _ => return None,
    };

    (amount > Decimal::ZERO).then_some(amount)
}

/// Accepts a calendar date or a date-time whose first ten characters are the date.
fn parse_suggested_date(text: &str) -> Option<Date> {
    let date_part = text.trim().get(..10)?;

    Date::parse(date_part, format_description!("[year]-[month]-[day]")).ok()
}

fn validate_category(category: Option<&str>) -> String {
    category
        .map(|category| category.trim().to_lowercase())
        .filter(|category| EXPENSE_CATEGORIES.contains(&category.as_str()))
        .unwrap_or_else(|| FALLBACK_CATEGORY.to_owned())
}
