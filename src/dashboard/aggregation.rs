//! Transaction aggregation for the account chart.
//!
//! Groups transactions into one income/expense record per calendar day and
//! sums those records into the totals shown above the chart.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, Duration};

use crate::{Error, Transaction, TransactionType};

/// The income and expense recorded on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    /// The calendar day.
    pub date: Date,
    /// The sum of the day's income.
    pub income: Decimal,
    /// The sum of the day's expenses, as a positive amount.
    pub expense: Decimal,
}

/// The totals over a set of daily summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartTotals {
    /// Total income.
    pub income: Decimal,
    /// Total expenses, as a positive amount.
    pub expense: Decimal,
    /// Income minus expenses.
    pub net: Decimal,
}

/// Group `transactions` by day, keeping only those dated within `window_days`
/// of `today` (inclusive at both ends), or all of them if `window_days` is `None`.
///
/// Yields one [DailySummary] per day with at least one transaction, oldest
/// first. Transactions dated after `today` are excluded when a window is set.
///
/// # Errors
/// Returns [Error::Invalid] if a day's income or expense overflows.
pub fn aggregate_by_day<'a>(
    transactions: impl IntoIterator<Item = &'a Transaction>,
    window_days: Option<i64>,
    today: Date,
) -> Result<impl Iterator<Item = DailySummary>, Error> {
    let window = window_days.map(|days| {
        let start = today
            .checked_sub(Duration::days(days))
            .unwrap_or(Date::MIN);
        start..=today
    });

    let mut days: BTreeMap<Date, DailySummary> = BTreeMap::new();

    for transaction in transactions {
        if window
            .as_ref()
            .is_some_and(|window| !window.contains(&transaction.date))
        {
            continue;
        }

        let day = days.entry(transaction.date).or_insert(DailySummary {
            date: transaction.date,
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        });

        let sum = match transaction.transaction_type {
            TransactionType::Income => &mut day.income,
            TransactionType::Expense => &mut day.expense,
        };
        *sum = sum
            .checked_add(transaction.amount)
            .ok_or_else(|| overflow_error(transaction.date))?;
    }

    Ok(days.into_values())
}

/// Sum the income and expenses of `days`.
///
/// # Errors
/// Returns [Error::Invalid] if a total overflows.
pub fn summarise<'a>(
    days: impl IntoIterator<Item = &'a DailySummary>,
) -> Result<ChartTotals, Error> {
    let (income, expense) = days.into_iter().try_fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expense), day| {
            Some((
                income.checked_add(day.income)?,
                expense.checked_add(day.expense)?,
            ))
        },
    )
    .ok_or_else(total_overflow_error)?;

    let net = income.checked_sub(expense).ok_or_else(total_overflow_error)?;

    Ok(ChartTotals {
        income,
        expense,
        net,
    })
}

fn overflow_error(date: Date) -> Error {
    Error::Invalid(format!("the totals for {date} are too large to chart"))
}

fn total_overflow_error() -> Error {
    Error::Invalid("the chart totals are too large to compute".to_owned())
}
