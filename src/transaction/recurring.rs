//! Calculates when a recurring transaction happens next.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month};

use crate::Error;

/// How often a recurring transaction repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecurringInterval {
    /// Every day.
    Daily,
    /// Every seven days.
    Weekly,
    /// The same day every month.
    Monthly,
    /// The same day every year.
    Yearly,
}

impl RecurringInterval {
    fn as_str(&self) -> &'static str {
        match self {
            RecurringInterval::Daily => "DAILY",
            RecurringInterval::Weekly => "WEEKLY",
            RecurringInterval::Monthly => "MONTHLY",
            RecurringInterval::Yearly => "YEARLY",
        }
    }
}

impl Display for RecurringInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurringInterval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DAILY" => Ok(RecurringInterval::Daily),
            "WEEKLY" => Ok(RecurringInterval::Weekly),
            "MONTHLY" => Ok(RecurringInterval::Monthly),
            "YEARLY" => Ok(RecurringInterval::Yearly),
            other => Err(Error::Invalid(format!(
                "unknown recurring interval \"{other}\""
            ))),
        }
    }
}

impl ToSql for RecurringInterval {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for RecurringInterval {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// Get the date one `interval` after `date`.
///
/// Monthly and yearly steps keep the day of the month where possible. When the
/// target month is shorter, the date is clamped to the last day of that month,
/// e.g. 31 January steps to 28 February (29 in a leap year) and 29 February
/// steps a year to 28 February.
///
/// # Errors
/// Returns [Error::Invalid] if the result is past the largest representable date.
pub fn advance(date: Date, interval: RecurringInterval) -> Result<Date, Error> {
    let next = match interval {
        RecurringInterval::Daily => date.checked_add(Duration::days(1)),
        RecurringInterval::Weekly => date.checked_add(Duration::weeks(1)),
        RecurringInterval::Monthly => {
            let (year, month) = match date.month() {
                Month::December => (date.year() + 1, Month::January),
                month => (date.year(), month.next()),
            };
            clamped_date(year, month, date.day())
        }
        RecurringInterval::Yearly => clamped_date(date.year() + 1, date.month(), date.day()),
    };

    next.ok_or_else(|| Error::Invalid(format!("cannot schedule {interval} after {date}")))
}

/// The date `year`-`month`-`day`, or the last day of the month if `day` is past it.
fn clamped_date(year: i32, month: Month, day: u8) -> Option<Date> {
    let last_day = last_day_of_month(year, month)?;

    Date::from_calendar_date(year, month, day.min(last_day)).ok()
}

fn last_day_of_month(year: i32, month: Month) -> Option<u8> {
    let first_of_next_month = match month {
        Month::December => Date::from_calendar_date(year + 1, Month::January, 1),
        month => Date::from_calendar_date(year, month.next(), 1),
    }
    .ok()?;

    first_of_next_month.previous_day().map(|date| date.day())
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        Error,
        transaction::recurring::{RecurringInterval, advance},
    };

    #[test]
    fn daily_and_weekly_add_whole_days() {
        assert_eq!(
            advance(date!(2024 - 12 - 31), RecurringInterval::Daily),
            Ok(date!(2025 - 01 - 01))
        );
        assert_eq!(
            advance(date!(2024 - 02 - 26), RecurringInterval::Weekly),
            Ok(date!(2024 - 03 - 04))
        );
    }

    #[test]
    fn monthly_keeps_day_of_month() {
        assert_eq!(
            advance(date!(2024 - 01 - 15), RecurringInterval::Monthly),
            Ok(date!(2024 - 02 - 15))
        );
        assert_eq!(
            advance(date!(2024 - 12 - 15), RecurringInterval::Monthly),
            Ok(date!(2025 - 01 - 15))
        );
    }

    #[test]
    fn monthly_clamps_to_end_of_shorter_month() {
        assert_eq!(
            advance(date!(2024 - 01 - 31), RecurringInterval::Monthly),
            Ok(date!(2024 - 02 - 29))
        );
        assert_eq!(
            advance(date!(2023 - 01 - 31), RecurringInterval::Monthly),
            Ok(date!(2023 - 02 - 28))
        );
        assert_eq!(
            advance(date!(2024 - 03 - 31), RecurringInterval::Monthly),
            Ok(date!(2024 - 04 - 30))
        );
    }

    #[test]
    fn yearly_clamps_leap_day() {
        assert_eq!(
            advance(date!(2024 - 02 - 29), RecurringInterval::Yearly),
            Ok(date!(2025 - 02 - 28))
        );
        assert_eq!(
            advance(date!(2023 - 07 - 04), RecurringInterval::Yearly),
            Ok(date!(2024 - 07 - 04))
        );
    }

    #[test]
    fn overflow_is_invalid() {
        assert!(matches!(
            advance(Date::MAX, RecurringInterval::Daily),
            Err(Error::Invalid(_))
        ));
    }

    #[test]
    fn unknown_interval_is_invalid() {
        assert!(matches!(
            "FORTNIGHTLY".parse::<RecurringInterval>(),
            Err(Error::Invalid(_))
        ));
        assert_eq!(
            "MONTHLY".parse::<RecurringInterval>(),
            Ok(RecurringInterval::Monthly)
        );
    }
}
