//! Summary command handler.

use crate::aggregate::{self, Totals, WindowTotals};
use crate::args::SummaryArgs;
use crate::commands::Out;
use crate::model::MonthlyExpense;
use crate::store::Store;
use crate::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

/// Everything shown by `flow summary`.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// The date whose month ends the window.
    pub as_of: NaiveDate,
    /// Oldest month first.
    pub months: Vec<MonthlyExpense>,
    pub window: WindowTotals,
    pub all_time: Totals,
}

/// Summarizes the six months ending in the month of `args.as_of()`, or of `today` when no date
/// was given, along with all-time totals.
pub fn summary(store: &Store, args: SummaryArgs, today: NaiveDate) -> Result<Out<Summary>> {
    let as_of = args.as_of().unwrap_or(today);
    let transactions = store.list();
    let months = aggregate::aggregate(&transactions, as_of);
    let summary = Summary {
        as_of,
        window: aggregate::window_totals(&months),
        all_time: aggregate::totals(&transactions),
        months,
    };
    let message = render(&summary)?;
    Ok(Out::new(message, summary))
}

fn render(summary: &Summary) -> Result<String> {
    let mut s = String::new();
    writeln!(s, "{:<10}  {:>14}  {:>14}", "Month", "Income", "Expenses")?;
    for month in &summary.months {
        writeln!(
            s,
            "{:<10}  {:>14}  {:>14}",
            month.month(),
            month.income().to_string(),
            month.expenses().to_string()
        )?;
    }
    let window = &summary.window;
    writeln!(
        s,
        "Last 6 months: income {}, expenses {}, net {}",
        window.income, window.expenses, window.net
    )?;
    let all = &summary.all_time;
    write!(
        s,
        "All time: balance {}, income {}, expenses {}",
        all.balance, all.income, all.expenses
    )?;
    Ok(s)
}
