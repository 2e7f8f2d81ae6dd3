//! Searching and ordering the transaction history.

use crate::model::Transaction;
use serde::{Deserialize, Serialize};

/// How the history should be ordered.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Most recent transaction date first.
    #[default]
    Date,
    /// Largest absolute amount first.
    Amount,
}

serde_plain::derive_display_from_serialize!(SortBy);
serde_plain::derive_fromstr_from_deserialize!(SortBy);

/// Keeps the transactions whose description contains `search`, ignoring case, and orders them
/// according to `sort`. An empty or missing `search` keeps everything. Ties keep their stored
/// order.
pub fn search(
    transactions: Vec<Transaction>,
    search: Option<&str>,
    sort: SortBy,
) -> Vec<Transaction> {
    let needle = search.map(str::to_lowercase).unwrap_or_default();
    let mut found: Vec<Transaction> = transactions
        .into_iter()
        .filter(|t| t.description.to_lowercase().contains(&needle))
        .collect();
    match sort {
        SortBy::Date => found.sort_by(|a, b| b.date.cmp(&a.date)),
        SortBy::Amount => found.sort_by(|a, b| b.amount.abs().cmp(&a.amount.abs())),
    }
    found
}
