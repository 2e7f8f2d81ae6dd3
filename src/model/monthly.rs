use crate::model::Amount;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// A calendar month, e.g. January 2025.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct YearMonth {
    year: i32,
    /// 1 through 12.
    month: u32,
}

impl YearMonth {
    /// The month that contains `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// The calendar month immediately before this one.
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// True when `date` lies between the first and last day of this month, inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl Display for YearMonth {
    /// Abbreviated month name and four digit year, e.g. `Jan 2025`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match NaiveDate::from_ymd_opt(self.year, self.month, 1) {
            Some(first) => write!(f, "{}", first.format("%b %Y")),
            None => write!(f, "{:04}-{:02}", self.year, self.month),
        }
    }
}

/// Income and expense totals for one month of the trailing window. Derived on demand, never
/// stored.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct MonthlyExpense {
    pub(crate) month: String,
    pub(crate) income: Amount,
    /// Absolute value of the summed expense amounts.
    pub(crate) expenses: Amount,
}

impl MonthlyExpense {
    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn income(&self) -> Amount {
        self.income
    }

    pub fn expenses(&self) -> Amount {
        self.expenses
    }
}
