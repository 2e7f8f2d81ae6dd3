//! List command handler.

use crate::args::ListArgs;
use crate::commands::{describe, Out};
use crate::model::Transaction;
use crate::query;
use crate::store::Store;
use crate::Result;

/// Lists the transaction history, filtered by `args.search()` and ordered by `args.sort()`.
pub fn list_transactions(store: &Store, args: ListArgs) -> Result<Out<Vec<Transaction>>> {
    let found = query::search(store.list(), args.search(), args.sort());
    let count = found.len();
    let mut message = match (count, args.search()) {
        (0, Some(term)) if !term.is_empty() => format!("No transactions match '{term}'"),
        (0, _) => "No transactions yet".to_string(),
        _ => format!(
            "{} transaction{}",
            count,
            if count == 1 { "" } else { "s" }
        ),
    };
    for transaction in &found {
        message.push('\n');
        message.push_str(&describe(transaction));
    }
    Ok(Out::new(message, found))
}
