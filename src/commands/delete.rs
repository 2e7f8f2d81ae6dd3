//! Delete command handler.

use crate::args::DeleteArgs;
use crate::commands::{describe, Out};
use crate::model::Transaction;
use crate::store::Store;
use crate::Result;
use anyhow::{bail, Context};
use std::io::{BufRead, Write};

/// Deletes a transaction by ID.
///
/// Confirmation is the caller's job; see [`confirm_delete`].
///
/// # Errors
///
/// - Returns an error if the transaction ID is not found.
pub fn delete_transaction(store: &mut Store, args: DeleteArgs) -> Result<Out<String>> {
    let id = args.id();
    if !store.delete(id) {
        bail!("Transaction not found: {id}");
    }
    Ok(Out::new(format!("Deleted transaction {id}"), id.to_string()))
}

/// Shows `transaction` on `output` and asks whether it should be deleted. Only an answer starting
/// with `y` or `Y` counts as yes.
pub fn confirm_delete(
    input: &mut impl BufRead,
    output: &mut impl Write,
    transaction: &Transaction,
) -> Result<bool> {
    write!(
        output,
        "{}\nAre you sure you want to delete this transaction? [y/N] ",
        describe(transaction)
    )
    .and_then(|_| output.flush())
    .context("Unable to write the confirmation prompt")?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Unable to read the confirmation answer")?;
    Ok(answer.trim_start().starts_with(['y', 'Y']))
}
