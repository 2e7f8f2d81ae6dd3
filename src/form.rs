//! Validation of user-entered transaction fields.
//!
//! The store trusts what it is given, so this is where the rules live: the amount must be a
//! positive number, the date a real `YYYY-MM-DD` date and the description non-blank. The form
//! also owns the sign convention. Users always type a positive amount and the stored amount is
//! negated for expenses.

use crate::model::{Amount, NewTransaction, Transaction, TransactionType, TransactionUpdates};
use crate::Result;
use anyhow::bail;
use chrono::NaiveDate;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// The raw fields of a transaction as typed by a user. `None` means the field was left blank.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct TransactionForm {
    pub amount: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub kind: Option<TransactionType>,
}

/// A problem with one field of a [`TransactionForm`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl TransactionForm {
    /// Validates the form for creating a new transaction.
    ///
    /// The date defaults to `today` and the type defaults to expense. Every invalid field is
    /// reported, not just the first.
    pub fn into_new(self, today: NaiveDate) -> Result<NewTransaction> {
        let mut errors = Vec::new();
        let amount = match self.amount.as_deref() {
            Some(raw) => check(parse_amount(raw), &mut errors),
            None => {
                errors.push(AMOUNT_ERROR);
                None
            }
        };
        let date = match self.date.as_deref() {
            Some(raw) => check(parse_date(raw), &mut errors),
            None => Some(today),
        };
        let description = match self.description.as_deref() {
            Some(raw) => check(parse_description(raw), &mut errors),
            None => {
                errors.push(DESCRIPTION_ERROR);
                None
            }
        };
        let kind = self.kind.unwrap_or_default();

        match (amount, date, description) {
            (Some(amount), Some(date), Some(description)) if errors.is_empty() => {
                Ok(NewTransaction {
                    amount: kind.signed(amount),
                    date,
                    description,
                    kind,
                })
            }
            _ => invalid(&errors),
        }
    }

    /// Validates the form as a partial edit of `existing`. Blank fields are left unchanged.
    ///
    /// When only one of amount and type is given, the other is taken from `existing` so that the
    /// stored sign keeps matching the type. When neither is given the stored amount is left
    /// alone, even if its sign does not match its type.
    pub fn into_updates(self, existing: &Transaction) -> Result<TransactionUpdates> {
        let mut errors = Vec::new();
        let amount = self
            .amount
            .as_deref()
            .and_then(|raw| check(parse_amount(raw), &mut errors));
        let date = self
            .date
            .as_deref()
            .and_then(|raw| check(parse_date(raw), &mut errors));
        let description = self
            .description
            .as_deref()
            .and_then(|raw| check(parse_description(raw), &mut errors));
        if !errors.is_empty() {
            return invalid(&errors);
        }

        let amount = match (amount, self.kind) {
            (Some(magnitude), kind) => Some(kind.unwrap_or(existing.kind()).signed(magnitude)),
            (None, Some(kind)) => {
                let signed = kind.signed(existing.amount().abs());
                (signed != existing.amount()).then_some(signed)
            }
            (None, None) => None,
        };

        let updates = TransactionUpdates {
            amount,
            date,
            description,
            kind: self.kind,
        };
        if updates.is_empty() {
            bail!("Nothing to update, provide at least one of amount, date, description or type");
        }
        Ok(updates)
    }
}

const AMOUNT_ERROR: FieldError = FieldError {
    field: "amount",
    message: "Please enter a valid amount greater than 0",
};

const DATE_ERROR: FieldError = FieldError {
    field: "date",
    message: "Please enter a date as YYYY-MM-DD",
};

const DESCRIPTION_ERROR: FieldError = FieldError {
    field: "description",
    message: "Please enter a description",
};

fn check<T>(parsed: std::result::Result<T, FieldError>, errors: &mut Vec<FieldError>) -> Option<T> {
    match parsed {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

fn invalid<T>(errors: &[FieldError]) -> Result<T> {
    let joined = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    bail!("Invalid transaction: {joined}")
}

fn parse_amount(raw: &str) -> std::result::Result<Amount, FieldError> {
    match Amount::from_str(raw) {
        Ok(amount) if amount.is_positive() => Ok(amount),
        _ => Err(AMOUNT_ERROR),
    }
}

fn parse_date(raw: &str) -> std::result::Result<NaiveDate, FieldError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| DATE_ERROR)
}

fn parse_description(raw: &str) -> std::result::Result<String, FieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(DESCRIPTION_ERROR)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()
    }

    fn amt(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    fn form(amount: &str, description: &str, kind: TransactionType) -> TransactionForm {
        TransactionForm {
            amount: Some(amount.to_string()),
            date: None,
            description: Some(description.to_string()),
            kind: Some(kind),
        }
    }

    fn existing_expense() -> Transaction {
        Transaction::create(
            "t1".to_string(),
            NewTransaction {
                amount: amt("-20"),
                date: today(),
                description: "coffee".to_string(),
                kind: TransactionType::Expense,
            },
            Utc.with_ymd_and_hms(2025, 3, 9, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_expense_is_negated() {
        let new = form("20", "  coffee ", TransactionType::Expense)
            .into_new(today())
            .unwrap();
        assert_eq!(new.amount, amt("-20"));
        assert_eq!(new.description, "coffee");
        assert_eq!(new.date, today());
    }

    #[test]
    fn test_income_stays_positive() {
        let new = form("$1,500.00", "salary", TransactionType::Income)
            .into_new(today())
            .unwrap();
        assert_eq!(new.amount, amt("1500"));
        assert_eq!(new.kind, TransactionType::Income);
    }

    #[test]
    fn test_defaults_to_expense() {
        let mut f = form("5", "snack", TransactionType::Income);
        f.kind = None;
        f.date = Some("2024-12-31".to_string());
        let new = f.into_new(today()).unwrap();
        assert_eq!(new.kind, TransactionType::Expense);
        assert_eq!(new.date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_all_errors_reported() {
        let f = TransactionForm {
            amount: Some("0".to_string()),
            date: Some("2025-02-30".to_string()),
            description: Some("   ".to_string()),
            kind: None,
        };
        let msg = f.into_new(today()).unwrap_err().to_string();
        assert!(msg.contains("amount"), "{msg}");
        assert!(msg.contains("date"), "{msg}");
        assert!(msg.contains("description"), "{msg}");
    }

    #[test]
    fn test_negative_amount_rejected() {
        assert!(form("-5", "x", TransactionType::Expense)
            .into_new(today())
            .is_err());
        assert!(form("abc", "x", TransactionType::Expense)
            .into_new(today())
            .is_err());
    }

    #[test]
    fn test_update_description_only() {
        let f = TransactionForm {
            description: Some("latte".to_string()),
            ..Default::default()
        };
        let updates = f.into_updates(&existing_expense()).unwrap();
        assert_eq!(
            updates,
            TransactionUpdates {
                description: Some("latte".to_string()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_update_type_flips_sign() {
        let f = TransactionForm {
            kind: Some(TransactionType::Income),
            ..Default::default()
        };
        let updates = f.into_updates(&existing_expense()).unwrap();
        assert_eq!(updates.kind, Some(TransactionType::Income));
        assert_eq!(updates.amount, Some(amt("20")));
    }

    #[test]
    fn test_update_amount_keeps_expense_sign() {
        let f = TransactionForm {
            amount: Some("35".to_string()),
            ..Default::default()
        };
        let updates = f.into_updates(&existing_expense()).unwrap();
        assert_eq!(updates.amount, Some(amt("-35")));
        assert_eq!(updates.kind, None);
    }

    #[test]
    fn test_update_nothing() {
        let err = TransactionForm::default()
            .into_updates(&existing_expense())
            .unwrap_err();
        assert!(err.to_string().contains("Nothing to update"));
    }

    #[test]
    fn test_update_invalid_date() {
        let f = TransactionForm {
            date: Some("yesterday".to_string()),
            ..Default::default()
        };
        assert!(f.into_updates(&existing_expense()).is_err());
    }

    #[test]
    fn test_update_description_keeps_mismatched_sign() {
        // A positive expense, as written by an older version or another tool
        let mut refund = existing_expense();
        refund.amount = amt("20");
        let f = TransactionForm {
            description: Some("refund".to_string()),
            ..Default::default()
        };
        let updates = f.into_updates(&refund).unwrap();
        assert_eq!(updates.amount, None);
        assert_eq!(updates.description, Some("refund".to_string()));

        let f = TransactionForm {
            kind: Some(TransactionType::Expense),
            ..Default::default()
        };
        let updates = f.into_updates(&refund).unwrap();
        assert_eq!(updates.amount, Some(amt("-20")));
    }
}
