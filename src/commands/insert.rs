//! Insert command handler.

use crate::args::AddArgs;
use crate::commands::{describe, Out};
use crate::model::Transaction;
use crate::store::Store;
use crate::Result;
use chrono::NaiveDate;

/// Validates `args` and records a new transaction.
///
/// # Arguments
///
/// - `store` - Where the transaction will be persisted.
/// - `args` - The transaction as entered by the user.
/// - `today` - The date to use when `args` has no date.
///
/// # Returns
///
/// On success, returns an `Out` containing a message describing the new transaction and the
/// transaction itself, including its generated ID.
///
/// # Errors
///
/// - Returns an error listing every invalid field if validation fails.
pub fn insert_transaction(
    store: &mut Store,
    args: AddArgs,
    today: NaiveDate,
) -> Result<Out<Transaction>> {
    let new = args.form().into_new(today)?;
    let transaction = store.create(new);
    let message = format!("Added transaction\n{}", describe(&transaction));
    Ok(Out::new(message, transaction))
}
