//! The request body for creating or editing a transaction.

use rust_decimal::Decimal;
use serde::Deserialize;
use time::Date;

use crate::{
    Error, TransactionStatus, TransactionType,
    database_id::AccountId,
    transaction::{RecurringInterval, recurring::advance},
};

/// The fields a caller supplies to create a transaction or to replace the
/// fields of an existing one.
///
/// Unknown fields are rejected so that typos do not silently drop data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransactionDraft {
    /// The account the money moved in or out of.
    pub account_id: AccountId,
    /// Whether money was earned or spent.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The amount of money that moved, must be greater than zero.
    pub amount: Decimal,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    #[serde(default)]
    pub description: String,
    /// A category tag, e.g. "groceries".
    pub category: String,
    /// Whether the transaction has settled, defaults to completed.
    #[serde(default)]
    pub status: TransactionStatus,
    /// Whether the transaction repeats.
    #[serde(default)]
    pub is_recurring: bool,
    /// How often the transaction repeats, required when `is_recurring`.
    #[serde(default)]
    pub recurring_interval: Option<RecurringInterval>,
}

/// The recurrence fields derived from a valid draft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recurrence {
    /// How often the transaction repeats.
    pub interval: Option<RecurringInterval>,
    /// When the transaction next repeats.
    pub next_date: Option<Date>,
}

impl TransactionDraft {
    /// Check the draft and derive its recurrence fields.
    ///
    /// A non-recurring draft always yields no interval and no next date, even
    /// if an interval was supplied.
    ///
    /// # Errors
    /// Returns [Error::Invalid] if:
    /// - the amount is zero or negative,
    /// - the category is blank,
    /// - the draft is recurring but has no interval,
    /// - or the next recurring date cannot be represented.
    pub fn validate(&self) -> Result<Recurrence, Error> {
        if self.amount <= Decimal::ZERO {
            return Err(Error::Invalid(format!(
                "amount must be greater than zero, got {}",
                self.amount
            )));
        }

        if self.category.trim().is_empty() {
            return Err(Error::Invalid("category cannot be empty".to_owned()));
        }

        if !self.is_recurring {
            return Ok(Recurrence {
                interval: None,
                next_date: None,
            });
        }

        let interval = self.recurring_interval.ok_or_else(|| {
            Error::Invalid("a recurring transaction needs a recurring interval".to_owned())
        })?;

        Ok(Recurrence {
            interval: Some(interval),
            next_date: Some(advance(self.date, interval)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use time::macros::date;

    use crate::{
        Error, RecurringInterval, TransactionStatus,
        test_utils::expense,
        transaction::{TransactionDraft, draft::Recurrence},
    };

    #[test]
    fn non_positive_amounts_are_invalid() {
        for amount in [dec!(0), dec!(-5)] {
            let draft = expense(1, amount, date!(2025 - 10 - 05));

            assert!(matches!(draft.validate(), Err(Error::Invalid(_))));
        }
    }

    #[test]
    fn recurring_without_interval_is_invalid() {
        let draft = TransactionDraft {
            is_recurring: true,
            ..expense(1, dec!(5), date!(2025 - 10 - 05))
        };

        assert!(matches!(draft.validate(), Err(Error::Invalid(_))));
    }

    #[test]
    fn interval_is_dropped_when_not_recurring() {
        let draft = TransactionDraft {
            recurring_interval: Some(RecurringInterval::Weekly),
            ..expense(1, dec!(5), date!(2025 - 10 - 05))
        };

        assert_eq!(
            draft.validate(),
            Ok(Recurrence {
                interval: None,
                next_date: None
            })
        );
    }

    #[test]
    fn recurring_draft_gets_next_date() {
        let draft = TransactionDraft {
            is_recurring: true,
            recurring_interval: Some(RecurringInterval::Monthly),
            ..expense(1, dec!(5), date!(2025 - 01 - 31))
        };

        assert_eq!(
            draft.validate(),
            Ok(Recurrence {
                interval: Some(RecurringInterval::Monthly),
                next_date: Some(date!(2025 - 02 - 28))
            })
        );
    }

    #[test]
    fn deserialises_with_defaults() {
        let json = r#"{
            "account_id": 3,
            "type": "INCOME",
            "amount": "1000.50",
            "date": "2025-10-05",
            "category": "salary"
        }"#;

        let draft: TransactionDraft = serde_json::from_str(json).unwrap();

        assert_eq!(draft.amount, dec!(1000.50));
        assert_eq!(draft.status, TransactionStatus::Completed);
        assert_eq!(draft.description, "");
        assert!(!draft.is_recurring);
    }

    #[test]
    fn rejects_unknown_fields_and_enum_values() {
        let unknown_field = r#"{
            "account_id": 3, "type": "INCOME", "amount": "1", "date": "2025-10-05",
            "category": "salary", "balance": "12"
        }"#;
        let unknown_type = r#"{
            "account_id": 3, "type": "REFUND", "amount": "1", "date": "2025-10-05",
            "category": "salary"
        }"#;

        assert!(serde_json::from_str::<TransactionDraft>(unknown_field).is_err());
        assert!(serde_json::from_str::<TransactionDraft>(unknown_type).is_err());
    }
}
