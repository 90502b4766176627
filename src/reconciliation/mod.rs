//! Bank statement reconciliation: matching, confidence scoring and the
//! auto-reconcile policy.
//!
//! The engine works against an account's unreconciled transactions through
//! a [`TransactionStore`]. Statement parsing (OFX/CSV/XML) happens
//! upstream; callers hand in already-normalized [`StatementEntry`] lists.
//! Concurrent imports for the same account must be serialized by the
//! caller.

use bigdecimal::BigDecimal;
use chrono::{Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub mod similarity;

use crate::traits::TransactionStore;
use crate::types::*;
use crate::utils::validation::{validate_account_id, validate_statement_entry};

/// Outcome of matching one statement entry against the account
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// An existing transaction was found and reconciled
    Matched(TransactionRecord),
    /// No counterpart existed; a new, already-reconciled transaction was
    /// created from the bank's record
    Imported(TransactionRecord),
}

/// A statement entry that failed during batch import
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryError {
    /// The offending entry
    pub entry: StatementEntry,
    /// Why it failed
    pub reason: String,
}

/// Result of importing a parsed bank statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementImport {
    /// Entries that created new transactions
    pub imported: u32,
    /// Entries matched to existing transactions
    pub matched: u32,
    /// Entries that failed; the rest of the batch still ran
    pub errors: Vec<EntryError>,
}

/// Result of an auto-reconcile pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoReconcileSummary {
    /// Transactions reconciled by the policy
    pub reconciled: u32,
    /// Unreconciled transactions left on the account
    pub remaining: u32,
}

/// Suggested counterparts for one unreconciled transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSuggestion {
    /// The transaction needing reconciliation
    pub transaction: TransactionRecord,
    /// Candidates sorted by descending confidence
    pub candidates: Vec<MatchCandidate>,
    /// Confidence of the best candidate
    pub best_confidence: u8,
}

/// Reporting window, anchored at "now" and starting at the period boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportPeriod {
    /// Since Monday of the current week
    Week,
    /// Since the first of the current month
    Month,
    /// Since the first day of the current quarter
    Quarter,
    /// Since January 1st
    Year,
}

impl ReportPeriod {
    /// Start of the period containing `now`
    pub fn start_from(&self, now: NaiveDate) -> NaiveDate {
        match self {
            ReportPeriod::Week => {
                now - Duration::days(now.weekday().num_days_from_monday() as i64)
            }
            ReportPeriod::Month => NaiveDate::from_ymd_opt(now.year(), now.month(), 1)
                .unwrap_or(now),
            ReportPeriod::Quarter => {
                let quarter_start_month = (now.month() - 1) / 3 * 3 + 1;
                NaiveDate::from_ymd_opt(now.year(), quarter_start_month, 1).unwrap_or(now)
            }
            ReportPeriod::Year => NaiveDate::from_ymd_opt(now.year(), 1, 1).unwrap_or(now),
        }
    }
}

/// Aggregated reconciliation figures for one account over a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub period: ReportPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_transactions: u32,
    pub reconciled_count: u32,
    pub unreconciled_count: u32,
    pub reconciled_amount: BigDecimal,
    pub unreconciled_amount: BigDecimal,
    /// reconciled / total × 100, or 0 when the window is empty
    pub reconciliation_rate: f64,
    pub unreconciled_transactions: Vec<TransactionRecord>,
}

/// Heuristic auto-reconciliation thresholds.
///
/// Injected configuration, tunable per deployment. The defaults mirror
/// common Brazilian banking noise (fees, interest, recurring charges).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoReconcilePolicy {
    /// Reconcile anything older than this many days
    pub max_age_days: i64,
    /// Reconcile anything below this amount
    pub small_amount: BigDecimal,
    /// Reconcile descriptions containing any of these (case-insensitive)
    pub description_keywords: Vec<String>,
}

impl Default for AutoReconcilePolicy {
    fn default() -> Self {
        Self {
            max_age_days: 30,
            small_amount: BigDecimal::from(10),
            description_keywords: ["taxa", "tarifa", "anuidade", "mensalidade", "juros"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl AutoReconcilePolicy {
    /// Whether a transaction qualifies for auto-reconciliation as of the
    /// given date. Best-effort heuristic, not a correctness guarantee.
    pub fn matches(&self, transaction: &TransactionRecord, as_of: NaiveDate) -> bool {
        if (as_of - transaction.date).num_days() > self.max_age_days {
            return true;
        }

        if transaction.amount < self.small_amount {
            return true;
        }

        let description = transaction.description.to_lowercase();
        self.description_keywords
            .iter()
            .any(|keyword| description.contains(&keyword.to_lowercase()))
    }
}

/// Confidence (0..=100) that two transactions describe the same event.
///
/// 40 points for an equal amount, 30 for an equal non-empty reference,
/// up to 20 for date proximity within a week, up to 10 for description
/// similarity.
pub fn score_match(a: &TransactionRecord, b: &TransactionRecord) -> u8 {
    let mut confidence: i64 = 0;

    if a.amount == b.amount {
        confidence += 40;
    }

    if let (Some(ref_a), Some(ref_b)) = (a.reference.as_deref(), b.reference.as_deref()) {
        if !ref_a.is_empty() && ref_a == ref_b {
            confidence += 30;
        }
    }

    let days_apart = (a.date - b.date).num_days().abs();
    if days_apart <= 7 {
        confidence += (20 - 2 * days_apart).max(0);
    }

    let percent = similarity::similarity_percent(
        &a.description.to_lowercase(),
        &b.description.to_lowercase(),
    );
    confidence += (percent * 0.1) as i64;

    confidence.min(100) as u8
}

/// Matching window for the amount/date fallback, in days each side
const AMOUNT_MATCH_WINDOW_DAYS: i64 = 3;

/// Reconciles bank statement entries against an account's transactions
pub struct ReconciliationEngine<S: TransactionStore> {
    store: S,
    policy: AutoReconcilePolicy,
}

impl<S: TransactionStore> ReconciliationEngine<S> {
    /// Create an engine with the default auto-reconcile policy
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: AutoReconcilePolicy::default(),
        }
    }

    /// Create an engine with a custom auto-reconcile policy
    pub fn with_policy(store: S, policy: AutoReconcilePolicy) -> Self {
        Self { store, policy }
    }

    /// The active auto-reconcile policy
    pub fn policy(&self) -> &AutoReconcilePolicy {
        &self.policy
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Import a parsed bank statement into the account.
    ///
    /// Each entry is matched or created independently: a business error on
    /// one entry is recorded and the batch continues. An unknown account
    /// or a storage failure aborts the whole batch.
    pub async fn import_statement(
        &mut self,
        account_id: &str,
        entries: Vec<StatementEntry>,
    ) -> CoreResult<StatementImport> {
        validate_account_id(account_id)?;
        // Unknown account fails the batch before any entry is touched
        self.store.find_unreconciled(account_id).await?;

        let mut summary = StatementImport::default();

        for entry in entries {
            match self.match_or_create(account_id, &entry).await {
                Ok(MatchOutcome::Matched(transaction)) => {
                    debug!(account_id, transaction_id = %transaction.id, "entry matched");
                    summary.matched += 1;
                }
                Ok(MatchOutcome::Imported(transaction)) => {
                    debug!(account_id, transaction_id = %transaction.id, "entry imported");
                    summary.imported += 1;
                }
                Err(error @ CoreError::Storage(_)) => return Err(error),
                Err(error) => summary.errors.push(EntryError {
                    entry,
                    reason: error.to_string(),
                }),
            }
        }

        info!(
            account_id,
            imported = summary.imported,
            matched = summary.matched,
            errors = summary.errors.len(),
            "statement import finished"
        );

        Ok(summary)
    }

    /// Match one statement entry to an existing unreconciled transaction,
    /// or create a new transaction from it.
    ///
    /// Lookup order: exact reference match first, then equal amount within
    /// ±3 days. A created transaction is born reconciled since the bank's
    /// record is authoritative. Exactly one of matched/imported holds.
    pub async fn match_or_create(
        &mut self,
        account_id: &str,
        entry: &StatementEntry,
    ) -> CoreResult<MatchOutcome> {
        validate_statement_entry(entry)?;

        if let Some(reference) = entry.reference.as_deref().filter(|r| !r.is_empty()) {
            if let Some(transaction) = self.store.find_by_reference(account_id, reference).await? {
                let transaction = self.store.reconcile(&transaction.id).await?;
                return Ok(MatchOutcome::Matched(transaction));
            }
        }

        let amount = entry.amount.abs();
        if let Some(transaction) = self
            .store
            .find_by_amount_in_window(account_id, &amount, entry.date, AMOUNT_MATCH_WINDOW_DAYS)
            .await?
        {
            let transaction = self.store.reconcile(&transaction.id).await?;
            return Ok(MatchOutcome::Matched(transaction));
        }

        let kind = if entry.amount > BigDecimal::from(0) {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        let mut record = TransactionRecord::new(
            account_id,
            kind,
            entry.description.clone(),
            amount,
            entry.date,
            entry.reference.clone(),
        );
        record.reconcile();
        self.store.save(&record).await?;

        Ok(MatchOutcome::Imported(record))
    }

    /// Reconcile every unreconciled transaction on the account that the
    /// policy accepts
    pub async fn auto_reconcile(&mut self, account_id: &str) -> CoreResult<AutoReconcileSummary> {
        let unreconciled = self.store.find_unreconciled(account_id).await?;
        let today = Utc::now().date_naive();
        let total = unreconciled.len() as u32;
        let mut reconciled = 0;

        for transaction in unreconciled {
            if self.policy.matches(&transaction, today) {
                self.store.reconcile(&transaction.id).await?;
                reconciled += 1;
            }
        }

        info!(account_id, reconciled, remaining = total - reconciled, "auto-reconcile pass");

        Ok(AutoReconcileSummary {
            reconciled,
            remaining: total - reconciled,
        })
    }

    /// Reconcile the listed transactions; unknown or already-reconciled
    /// ids are skipped. Returns how many were reconciled.
    pub async fn manual_reconcile(&mut self, transaction_ids: &[String]) -> CoreResult<usize> {
        let mut reconciled = 0;

        for id in transaction_ids {
            if let Some(transaction) = self.store.get(id).await? {
                if !transaction.is_reconciled {
                    self.store.reconcile(id).await?;
                    reconciled += 1;
                }
            }
        }

        Ok(reconciled)
    }

    /// Propose counterparts among the account's unreconciled transactions.
    ///
    /// Candidates share an amount or a non-empty reference with the
    /// transaction; transactions with no candidate are omitted.
    pub async fn suggest_matches(&self, account_id: &str) -> CoreResult<Vec<MatchSuggestion>> {
        let unreconciled = self.store.find_unreconciled(account_id).await?;
        let mut suggestions = Vec::new();

        for transaction in &unreconciled {
            let has_reference = transaction
                .reference
                .as_deref()
                .is_some_and(|r| !r.is_empty());

            let mut candidates: Vec<MatchCandidate> = unreconciled
                .iter()
                .filter(|other| other.id != transaction.id)
                .filter(|other| {
                    other.amount == transaction.amount
                        || (has_reference && other.reference == transaction.reference)
                })
                .map(|other| MatchCandidate {
                    transaction: other.clone(),
                    confidence: score_match(transaction, other),
                })
                .collect();

            if candidates.is_empty() {
                continue;
            }

            candidates.sort_by(|a, b| b.confidence.cmp(&a.confidence));
            let best_confidence = candidates[0].confidence;
            suggestions.push(MatchSuggestion {
                transaction: transaction.clone(),
                candidates,
                best_confidence,
            });
        }

        Ok(suggestions)
    }

    /// Reconciliation figures for the current period, anchored at today
    pub async fn report(
        &self,
        account_id: &str,
        period: ReportPeriod,
    ) -> CoreResult<ReconciliationReport> {
        self.report_as_of(account_id, period, Utc::now().date_naive())
            .await
    }

    /// Reconciliation figures for the period containing `now`
    pub async fn report_as_of(
        &self,
        account_id: &str,
        period: ReportPeriod,
        now: NaiveDate,
    ) -> CoreResult<ReconciliationReport> {
        let start_date = period.start_from(now);
        let transactions = self.store.find_in_range(account_id, start_date, now).await?;

        let (reconciled, unreconciled): (Vec<_>, Vec<_>) = transactions
            .into_iter()
            .partition(|transaction| transaction.is_reconciled);

        let total = (reconciled.len() + unreconciled.len()) as u32;
        let reconciliation_rate = if total > 0 {
            reconciled.len() as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Ok(ReconciliationReport {
            period,
            start_date,
            end_date: now,
            total_transactions: total,
            reconciled_count: reconciled.len() as u32,
            unreconciled_count: unreconciled.len() as u32,
            reconciled_amount: reconciled.iter().map(|t| &t.amount).sum(),
            unreconciled_amount: unreconciled.iter().map(|t| &t.amount).sum(),
            reconciliation_rate,
            unreconciled_transactions: unreconciled,
        })
    }
}
