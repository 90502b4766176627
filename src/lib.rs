//! # Juris Core
//!
//! Core engine for legal practice management, covering the two
//! algorithmic pieces of the system: procedural deadline calculation over
//! a jurisdiction-aware business calendar, and bank statement
//! reconciliation with heuristic match scoring.
//!
//! ## Features
//!
//! - **Business calendar**: weekend and holiday arithmetic with
//!   national/state/city jurisdiction filters, including the movable
//!   Easter-derived holidays
//! - **Deadline calculation**: business-day projection with the
//!   procedural "day zero" convention, plus statutory appeal, response,
//!   execution and prescription terms
//! - **Reconciliation**: statement import with reference and amount/date
//!   matching, configurable auto-reconcile policy, match suggestions with
//!   confidence scores, and period reports
//! - **Storage abstraction**: database-agnostic design with trait-based
//!   stores
//!
//! ## Quick Start
//!
//! ```rust
//! use juris_core::{BusinessCalendar, DeadlineCalculator, national_holidays};
//! use chrono::NaiveDate;
//!
//! let calendar = BusinessCalendar::from_records(national_holidays(2024));
//! let calculator = DeadlineCalculator::new(calendar);
//!
//! let publication = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
//! let deadline = calculator.appeal_deadline(publication, Some("SP"));
//! assert!(deadline > publication);
//! ```

pub mod calendar;
pub mod deadline;
pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use calendar::{easter_sunday, national_holidays, BusinessCalendar};
pub use deadline::{DeadlineCalculator, ExecutionKind, PrescriptionKind};
pub use reconciliation::{
    score_match, AutoReconcilePolicy, AutoReconcileSummary, MatchOutcome, MatchSuggestion,
    ReconciliationEngine, ReconciliationReport, ReportPeriod, StatementImport,
};
pub use traits::*;
pub use types::*;
