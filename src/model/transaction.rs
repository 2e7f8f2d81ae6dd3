use crate::model::Amount;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Whether money came in or went out.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

serde_plain::derive_display_from_serialize!(TransactionType);
serde_plain::derive_fromstr_from_deserialize!(TransactionType);

impl TransactionType {
    /// Gives `amount` the sign that goes with this type: negative for expenses, non-negative for
    /// income.
    pub fn signed(&self, amount: Amount) -> Amount {
        match self {
            TransactionType::Income => amount.abs(),
            TransactionType::Expense => -amount.abs(),
        }
    }
}

/// A single income or expense record.
///
/// The JSON form uses the key names `id`, `amount`, `date`, `description`, `type`, `createdAt` and
/// `updatedAt`, with `amount` as a number and `date` as `YYYY-MM-DD`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub(crate) id: String,
    pub(crate) amount: Amount,
    pub(crate) date: NaiveDate,
    pub(crate) description: String,
    #[serde(rename = "type")]
    pub(crate) kind: TransactionType,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Builds the canonical record for `new`. Both timestamps are set to `now`.
    pub(crate) fn create(id: String, new: NewTransaction, now: DateTime<Utc>) -> Self {
        Self {
            id,
            amount: new.amount,
            date: new.date,
            description: new.description,
            kind: new.kind,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copies each field that is `Some` in `updates` over this record and stamps `updated_at`.
    pub(crate) fn apply(&mut self, updates: TransactionUpdates, now: DateTime<Utc>) {
        let TransactionUpdates {
            amount,
            date,
            description,
            kind,
        } = updates;
        if let Some(amount) = amount {
            self.amount = amount;
        }
        if let Some(date) = date {
            self.date = date;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(kind) = kind {
            self.kind = kind;
        }
        self.updated_at = now;
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// The caller-supplied fields of a transaction that is about to be created.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: Amount,
    pub date: NaiveDate,
    pub description: String,
    pub kind: TransactionType,
}

/// A partial set of changes for an existing transaction. `None` means leave the field alone.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdates {
    pub amount: Option<Amount>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
    pub kind: Option<TransactionType>,
}

impl TransactionUpdates {
    pub fn is_empty(&self) -> bool {
        self == &TransactionUpdates::default()
    }
}
