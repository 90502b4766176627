//! Traits for storage abstraction and extensibility

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::NaiveDate;

use crate::types::*;

/// Storage abstraction for transactions.
///
/// This trait allows the reconciliation engine to work with any backend
/// (PostgreSQL, MySQL, SQLite, in-memory, etc.) by implementing these
/// methods. All lookups are scoped to a single account; an unknown
/// account id yields [`CoreError::AccountNotFound`].
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// All unreconciled transactions on the account
    async fn find_unreconciled(&self, account_id: &str) -> CoreResult<Vec<TransactionRecord>>;

    /// First unreconciled transaction on the account with the given reference
    async fn find_by_reference(
        &self,
        account_id: &str,
        reference: &str,
    ) -> CoreResult<Option<TransactionRecord>>;

    /// First unreconciled transaction on the account with the given amount
    /// dated within `window_days` of `center` (closed interval on both sides)
    async fn find_by_amount_in_window(
        &self,
        account_id: &str,
        amount: &BigDecimal,
        center: NaiveDate,
        window_days: i64,
    ) -> CoreResult<Option<TransactionRecord>>;

    /// All transactions on the account dated within [start, end]
    async fn find_in_range(
        &self,
        account_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> CoreResult<Vec<TransactionRecord>>;

    /// Look up a transaction by id
    async fn get(&self, transaction_id: &str) -> CoreResult<Option<TransactionRecord>>;

    /// Persist a transaction (insert or replace)
    async fn save(&mut self, record: &TransactionRecord) -> CoreResult<()>;

    /// Mark a transaction as reconciled and return the updated record.
    ///
    /// Idempotent: reconciling an already-reconciled transaction is a
    /// no-op that keeps the original `reconciled_at`.
    async fn reconcile(&mut self, transaction_id: &str) -> CoreResult<TransactionRecord>;
}

/// Storage abstraction for the holiday calendar
#[async_trait]
pub trait HolidayStore: Send + Sync {
    /// All holiday records whose date falls in the given year.
    ///
    /// An empty result is not an error; it simply means no holidays are
    /// known for that year.
    async fn find_by_year(&self, year: i32) -> CoreResult<Vec<HolidayRecord>>;
}
