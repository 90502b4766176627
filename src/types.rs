//! Core types and data structures for the legal practice engine

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A holiday as loaded from the holiday store.
///
/// Records are jurisdiction-tagged: a national holiday applies everywhere,
/// while state/city holidays only apply when the caller's jurisdiction
/// matches the tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayRecord {
    /// Display name of the holiday (e.g. "Tiradentes")
    pub name: String,
    /// Calendar date of the holiday
    pub date: NaiveDate,
    /// Whether the holiday applies nationwide
    pub is_national: bool,
    /// Two-letter state code, for state holidays
    pub state: Option<String>,
    /// City name, for municipal holidays
    pub city: Option<String>,
}

impl HolidayRecord {
    /// Create a national holiday record
    pub fn national(name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            date,
            is_national: true,
            state: None,
            city: None,
        }
    }

    /// Create a state holiday record
    pub fn state(name: impl Into<String>, date: NaiveDate, state: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date,
            is_national: false,
            state: Some(state.into()),
            city: None,
        }
    }

    /// Create a municipal holiday record
    pub fn city(name: impl Into<String>, date: NaiveDate, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date,
            is_national: false,
            state: None,
            city: Some(city.into()),
        }
    }
}

/// Direction of a financial transaction.
///
/// Amounts are always stored non-negative; the sign is carried here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Money coming into the account
    Income,
    /// Money leaving the account
    Expense,
    /// Movement between internal accounts
    Transfer,
}

/// A financial transaction as persisted by the transaction store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique identifier for the transaction
    pub id: String,
    /// Account this transaction belongs to
    pub account_id: String,
    /// Income, expense or transfer
    pub kind: TransactionKind,
    /// Free-text description
    pub description: String,
    /// Non-negative amount; direction is carried by `kind`
    pub amount: BigDecimal,
    /// Date the transaction occurred
    pub date: NaiveDate,
    /// Optional bank reference (FITID, end-to-end id, check number, ...)
    pub reference: Option<String>,
    /// Whether the transaction has been confirmed against a bank statement
    pub is_reconciled: bool,
    /// When the transaction was reconciled, if it has been
    pub reconciled_at: Option<NaiveDateTime>,
    /// When the record was created
    pub created_at: NaiveDateTime,
    /// When the record was last updated
    pub updated_at: NaiveDateTime,
}

impl TransactionRecord {
    /// Create a new unreconciled transaction
    pub fn new(
        account_id: impl Into<String>,
        kind: TransactionKind,
        description: impl Into<String>,
        amount: BigDecimal,
        date: NaiveDate,
        reference: Option<String>,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            account_id: account_id.into(),
            kind,
            description: description.into(),
            amount,
            date,
            reference,
            is_reconciled: false,
            reconciled_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the transaction as reconciled.
    ///
    /// Idempotent: a second call keeps the timestamp set by the first.
    pub fn reconcile(&mut self) {
        if self.is_reconciled {
            return;
        }
        let now = chrono::Utc::now().naive_utc();
        self.is_reconciled = true;
        self.reconciled_at = Some(now);
        self.updated_at = now;
    }
}

/// One parsed line item from a bank statement file.
///
/// Parsing (OFX/CSV/XML) happens upstream; the engine only sees the
/// normalized form. The amount is signed: positive is a credit, negative
/// a debit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementEntry {
    /// Date the entry was posted
    pub date: NaiveDate,
    /// Description as it appears on the statement
    pub description: String,
    /// Signed amount: positive = credit, negative = debit
    pub amount: BigDecimal,
    /// Bank-side reference, when the format carries one
    pub reference: Option<String>,
}

impl StatementEntry {
    /// Create a statement entry
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: BigDecimal,
        reference: Option<String>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            reference,
        }
    }
}

/// A potential counterpart for an unreconciled transaction, with a
/// heuristic confidence score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// The candidate transaction
    pub transaction: TransactionRecord,
    /// Confidence that both records describe the same event, 0..=100
    pub confidence: u8,
}

/// Errors that can occur in the engine
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),
    #[error("Invalid statement entry: {0}")]
    InvalidEntry(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for engine operations
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reconcile_is_idempotent() {
        let mut tx = TransactionRecord::new(
            "acc1",
            TransactionKind::Expense,
            "Custas processuais",
            BigDecimal::from(250),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            None,
        );
        assert!(!tx.is_reconciled);
        assert!(tx.reconciled_at.is_none());

        tx.reconcile();
        assert!(tx.is_reconciled);
        let first = tx.reconciled_at;
        assert!(first.is_some());

        tx.reconcile();
        assert_eq!(tx.reconciled_at, first);
    }

    #[test]
    fn holiday_record_constructors_tag_jurisdiction() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 21).unwrap();
        let national = HolidayRecord::national("Tiradentes", date);
        assert!(national.is_national);
        assert!(national.state.is_none());

        let state = HolidayRecord::state("Revolução Constitucionalista", date, "SP");
        assert!(!state.is_national);
        assert_eq!(state.state.as_deref(), Some("SP"));

        let city = HolidayRecord::city("Aniversário da Cidade", date, "São Paulo");
        assert_eq!(city.city.as_deref(), Some("São Paulo"));
    }
}
