//! Update command handler.

use crate::args::UpdateArgs;
use crate::commands::{describe, Out};
use crate::model::Transaction;
use crate::store::Store;
use crate::Result;
use anyhow::{anyhow, Context};

/// Updates a transaction by ID with the fields given in `args`. Fields that were not given keep
/// their current values.
///
/// # Errors
///
/// - Returns an error if the transaction ID is not found.
/// - Returns an error if any given field is invalid, or if no fields were given.
pub fn update_transaction(store: &mut Store, args: UpdateArgs) -> Result<Out<Transaction>> {
    let id = args.id();
    let existing = store
        .get(id)
        .with_context(|| format!("Transaction not found: {id}"))?;
    let updates = args.form().into_updates(&existing)?;
    let updated = store
        .update(id, updates)
        .ok_or_else(|| anyhow!("Transaction not found: {id}"))?;
    let message = format!("Updated transaction\n{}", describe(&updated));
    Ok(Out::new(message, updated))
}
