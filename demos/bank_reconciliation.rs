//! Bank reconciliation walkthrough: import a parsed statement, run the
//! auto-reconcile policy and print a period report.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};
use juris_core::{
    utils::MemoryStore, ReconciliationEngine, ReportPeriod, StatementEntry, TransactionKind,
    TransactionRecord,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let today = Utc::now().date_naive();
    let store = MemoryStore::new();
    store.add_account("escritorio-principal");

    // A pending transaction recorded by the firm, awaiting confirmation
    store.add_transaction(TransactionRecord::new(
        "escritorio-principal",
        TransactionKind::Income,
        "Honorários contratuais - processo 0012345",
        BigDecimal::from_str("1500.00")?,
        today - Duration::days(2),
        Some("TX-9981".to_string()),
    ));

    let mut engine = ReconciliationEngine::new(store);

    // Entries as an external OFX/CSV parser would hand them over
    let entries = vec![
        StatementEntry::new(
            today,
            "TED RECEBIDA",
            BigDecimal::from_str("1500.00")?,
            Some("TX-9981".to_string()),
        ),
        StatementEntry::new(
            today - Duration::days(1),
            "TARIFA PACOTE SERVICOS",
            BigDecimal::from_str("-39.90")?,
            None,
        ),
    ];

    let summary = engine
        .import_statement("escritorio-principal", entries)
        .await?;
    println!(
        "Import: {} matched, {} imported, {} errors",
        summary.matched,
        summary.imported,
        summary.errors.len()
    );

    let auto = engine.auto_reconcile("escritorio-principal").await?;
    println!(
        "Auto-reconcile: {} reconciled, {} remaining",
        auto.reconciled, auto.remaining
    );

    let report = engine
        .report("escritorio-principal", ReportPeriod::Month)
        .await?;
    println!(
        "Report {} .. {}: {} transactions, {:.1}% reconciled",
        report.start_date, report.end_date, report.total_transactions, report.reconciliation_rate
    );

    Ok(())
}
