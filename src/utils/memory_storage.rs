//! In-memory storage implementation for testing and development

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{Duration, NaiveDate};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::traits::*;
use crate::types::*;

/// In-memory transaction and holiday store for tests and development.
///
/// Accounts must be registered with [`MemoryStore::add_account`] before
/// use; lookups against unknown accounts fail with `AccountNotFound`,
/// matching the behavior expected from a real backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    accounts: Arc<RwLock<HashSet<String>>>,
    transactions: Arc<RwLock<HashMap<String, TransactionRecord>>>,
    holidays: Arc<RwLock<Vec<HolidayRecord>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account
    pub fn add_account(&self, account_id: impl Into<String>) {
        self.accounts.write().unwrap().insert(account_id.into());
    }

    /// Seed holiday records
    pub fn add_holidays(&self, records: Vec<HolidayRecord>) {
        self.holidays.write().unwrap().extend(records);
    }

    /// Insert a transaction directly, bypassing the engine
    pub fn add_transaction(&self, record: TransactionRecord) {
        self.transactions
            .write()
            .unwrap()
            .insert(record.id.clone(), record.clone());
    }

    /// Clear all data (useful for testing)
    pub fn clear(&self) {
        self.accounts.write().unwrap().clear();
        self.transactions.write().unwrap().clear();
        self.holidays.write().unwrap().clear();
    }

    fn require_account(&self, account_id: &str) -> CoreResult<()> {
        if self.accounts.read().unwrap().contains(account_id) {
            Ok(())
        } else {
            Err(CoreError::AccountNotFound(account_id.to_string()))
        }
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn find_unreconciled(&self, account_id: &str) -> CoreResult<Vec<TransactionRecord>> {
        self.require_account(account_id)?;
        let transactions = self.transactions.read().unwrap();
        let mut found: Vec<TransactionRecord> = transactions
            .values()
            .filter(|t| t.account_id == account_id && !t.is_reconciled)
            .cloned()
            .collect();
        // Deterministic order for callers and tests
        found.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn find_by_reference(
        &self,
        account_id: &str,
        reference: &str,
    ) -> CoreResult<Option<TransactionRecord>> {
        self.require_account(account_id)?;
        let transactions = self.transactions.read().unwrap();
        Ok(transactions
            .values()
            .filter(|t| t.account_id == account_id && !t.is_reconciled)
            .find(|t| t.reference.as_deref() == Some(reference))
            .cloned())
    }

    async fn find_by_amount_in_window(
        &self,
        account_id: &str,
        amount: &BigDecimal,
        center: NaiveDate,
        window_days: i64,
    ) -> CoreResult<Option<TransactionRecord>> {
        self.require_account(account_id)?;
        let start = center - Duration::days(window_days);
        let end = center + Duration::days(window_days);
        let transactions = self.transactions.read().unwrap();
        let mut found: Vec<&TransactionRecord> = transactions
            .values()
            .filter(|t| {
                t.account_id == account_id
                    && !t.is_reconciled
                    && t.amount == *amount
                    && t.date >= start
                    && t.date <= end
            })
            .collect();
        found.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(found.first().map(|t| (*t).clone()))
    }

    async fn find_in_range(
        &self,
        account_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> CoreResult<Vec<TransactionRecord>> {
        self.require_account(account_id)?;
        let transactions = self.transactions.read().unwrap();
        let mut found: Vec<TransactionRecord> = transactions
            .values()
            .filter(|t| t.account_id == account_id && t.date >= start && t.date <= end)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn get(&self, transaction_id: &str) -> CoreResult<Option<TransactionRecord>> {
        Ok(self
            .transactions
            .read()
            .unwrap()
            .get(transaction_id)
            .cloned())
    }

    async fn save(&mut self, record: &TransactionRecord) -> CoreResult<()> {
        self.require_account(&record.account_id)?;
        self.transactions
            .write()
            .unwrap()
            .insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn reconcile(&mut self, transaction_id: &str) -> CoreResult<TransactionRecord> {
        let mut transactions = self.transactions.write().unwrap();
        let record = transactions
            .get_mut(transaction_id)
            .ok_or_else(|| CoreError::TransactionNotFound(transaction_id.to_string()))?;
        record.reconcile();
        Ok(record.clone())
    }
}

#[async_trait]
impl HolidayStore for MemoryStore {
    async fn find_by_year(&self, year: i32) -> CoreResult<Vec<HolidayRecord>> {
        use chrono::Datelike;
        Ok(self
            .holidays
            .read()
            .unwrap()
            .iter()
            .filter(|h| h.date.year() == year)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn unknown_accounts_are_rejected() {
        let store = MemoryStore::new();
        let result = store.find_unreconciled("ghost").await;
        assert!(matches!(result, Err(CoreError::AccountNotFound(_))));
    }

    #[tokio::test]
    async fn amount_window_is_inclusive_on_both_sides() {
        let store = MemoryStore::new();
        store.add_account("acc1");
        let tx = TransactionRecord::new(
            "acc1",
            TransactionKind::Expense,
            "Custas",
            BigDecimal::from(100),
            date(2024, 3, 4),
            None,
        );
        store.add_transaction(tx.clone());

        let hit = store
            .find_by_amount_in_window("acc1", &BigDecimal::from(100), date(2024, 3, 1), 3)
            .await
            .unwrap();
        assert_eq!(hit.map(|t| t.id), Some(tx.id.clone()));

        let miss = store
            .find_by_amount_in_window("acc1", &BigDecimal::from(100), date(2024, 2, 28), 3)
            .await
            .unwrap();
        assert!(miss.is_none());
    }

    #[tokio::test]
    async fn store_reconcile_is_idempotent() {
        let mut store = MemoryStore::new();
        store.add_account("acc1");
        let tx = TransactionRecord::new(
            "acc1",
            TransactionKind::Expense,
            "Custas",
            BigDecimal::from(100),
            date(2024, 3, 4),
            None,
        );
        store.add_transaction(tx.clone());

        let first = store.reconcile(&tx.id).await.unwrap();
        assert!(first.is_reconciled);
        let second = store.reconcile(&tx.id).await.unwrap();
        assert_eq!(second.reconciled_at, first.reconciled_at);
    }

    #[tokio::test]
    async fn holidays_filter_by_year() {
        let store = MemoryStore::new();
        store.add_holidays(vec![
            HolidayRecord::national("Natal", date(2024, 12, 25)),
            HolidayRecord::national("Natal", date(2025, 12, 25)),
        ]);
        let holidays = store.find_by_year(2024).await.unwrap();
        assert_eq!(holidays.len(), 1);
        assert_eq!(holidays[0].date, date(2024, 12, 25));
    }
}
