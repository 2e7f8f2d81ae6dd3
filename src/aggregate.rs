//! Monthly income and expense totals for charting.
//!
//! Everything here is a pure function of its inputs. The reference date is always passed in
//! explicitly so that results do not depend on when they are computed.

use crate::model::{Amount, MonthlyExpense, Transaction, TransactionType, YearMonth};
use chrono::NaiveDate;
use serde::Serialize;

/// The number of calendar months covered by [`aggregate`].
pub const WINDOW_MONTHS: usize = 6;

/// Summarizes `transactions` over the month containing `reference_date` and the five months
/// before it.
///
/// Always returns exactly [`WINDOW_MONTHS`] entries, oldest month first. A month without any
/// transactions is still present with zero income and zero expenses. Transactions dated outside
/// the window are ignored.
pub fn aggregate(transactions: &[Transaction], reference_date: NaiveDate) -> Vec<MonthlyExpense> {
    window(reference_date)
        .into_iter()
        .map(|month| summarize_month(transactions, month))
        .collect()
}

/// The months of the trailing window ending in the month of `reference_date`, oldest first.
pub fn window(reference_date: NaiveDate) -> Vec<YearMonth> {
    let mut months = Vec::with_capacity(WINDOW_MONTHS);
    let mut month = YearMonth::of(reference_date);
    for _ in 0..WINDOW_MONTHS {
        months.push(month);
        month = month.previous();
    }
    months.reverse();
    months
}

fn summarize_month(transactions: &[Transaction], month: YearMonth) -> MonthlyExpense {
    let in_month = || transactions.iter().filter(move |t| month.contains(t.date));
    let expenses: Amount = in_month()
        .filter(|t| t.kind == TransactionType::Expense)
        .map(|t| t.amount)
        .sum();
    let income: Amount = in_month()
        .filter(|t| t.kind == TransactionType::Income)
        .map(|t| t.amount)
        .sum();
    MonthlyExpense {
        month: month.to_string(),
        income,
        expenses: expenses.abs(),
    }
}

/// All-time figures over an entire transaction collection.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct Totals {
    /// The sum of every amount, income and expense alike.
    pub balance: Amount,
    pub income: Amount,
    /// Absolute value of the summed expense amounts.
    pub expenses: Amount,
}

/// Computes the balance, total income and total expenses of `transactions`.
pub fn totals(transactions: &[Transaction]) -> Totals {
    let of_kind = |kind: TransactionType| -> Amount {
        transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    };
    Totals {
        balance: transactions.iter().map(|t| t.amount).sum(),
        income: of_kind(TransactionType::Income),
        expenses: of_kind(TransactionType::Expense).abs(),
    }
}

/// Figures over the months returned by [`aggregate`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct WindowTotals {
    pub income: Amount,
    pub expenses: Amount,
    /// Income minus expenses.
    pub net: Amount,
}

pub fn window_totals(months: &[MonthlyExpense]) -> WindowTotals {
    let income: Amount = months.iter().map(|m| m.income).sum();
    let expenses: Amount = months.iter().map(|m| m.expenses).sum();
    WindowTotals {
        income,
        expenses,
        net: Amount::new(income.value() - expenses.value()),
    }
}
