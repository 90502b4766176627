//! Validation utilities

use bigdecimal::Zero;

use crate::types::*;

/// Validate an account ID
pub fn validate_account_id(account_id: &str) -> CoreResult<()> {
    if account_id.trim().is_empty() {
        return Err(CoreError::Validation(
            "Account ID cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validate a parsed statement entry before matching.
///
/// The parser guarantees date and amount are present; a zero amount means
/// the line carried no usable value and is rejected so the batch can
/// report it instead of creating an empty transaction.
pub fn validate_statement_entry(entry: &StatementEntry) -> CoreResult<()> {
    if entry.amount.is_zero() {
        return Err(CoreError::InvalidEntry(format!(
            "statement entry '{}' has a zero amount",
            entry.description
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use chrono::NaiveDate;

    #[test]
    fn zero_amount_entries_are_rejected() {
        let entry = StatementEntry::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            "SALDO ANTERIOR",
            BigDecimal::from(0),
            None,
        );
        assert!(matches!(
            validate_statement_entry(&entry),
            Err(CoreError::InvalidEntry(_))
        ));
    }

    #[test]
    fn signed_amounts_are_accepted() {
        let entry = StatementEntry::new(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            "PIX RECEBIDO",
            BigDecimal::from(-150),
            None,
        );
        assert!(validate_statement_entry(&entry).is_ok());
    }

    #[test]
    fn blank_account_ids_are_rejected() {
        assert!(validate_account_id("  ").is_err());
        assert!(validate_account_id("acc-1").is_ok());
    }
}
