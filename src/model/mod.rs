//! Types that represent the core data model, such as `Transaction` and `MonthlyExpense`.
mod amount;
mod monthly;
mod transaction;

pub use amount::{Amount, AmountError};
pub use monthly::{MonthlyExpense, YearMonth};
pub use transaction::{NewTransaction, Transaction, TransactionType, TransactionUpdates};
