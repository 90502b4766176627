//! Procedural deadline calculation over the business calendar

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::calendar::BusinessCalendar;

/// Business days granted for an appeal after publication of the decision
pub const APPEAL_DAYS: u32 = 15;
/// Business days granted for a response after citation
pub const RESPONSE_DAYS: u32 = 15;

/// Kind of execution proceeding, selecting the statutory business-day term.
///
/// Unrecognized inputs are kept as `Other` and fall back to the payment
/// term rather than failing; bad input never blocks a deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionKind {
    /// Payment of a sum (15 business days)
    Payment,
    /// Obligation to do (30 business days)
    ObligationToDo,
    /// Obligation not to do (10 business days)
    ObligationNotToDo,
    /// Unrecognized execution type; uses the default term
    Other(String),
}

impl ExecutionKind {
    /// Statutory term in business days
    pub fn business_days(&self) -> u32 {
        match self {
            ExecutionKind::Payment => 15,
            ExecutionKind::ObligationToDo => 30,
            ExecutionKind::ObligationNotToDo => 10,
            ExecutionKind::Other(_) => 15,
        }
    }
}

impl FromStr for ExecutionKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "payment" => ExecutionKind::Payment,
            "obligation_to_do" => ExecutionKind::ObligationToDo,
            "obligation_not_to_do" => ExecutionKind::ObligationNotToDo,
            other => ExecutionKind::Other(other.to_string()),
        })
    }
}

/// Kind of claim, selecting the statutory prescription term in calendar
/// years. Same fallback policy as [`ExecutionKind`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrescriptionKind {
    /// General civil claims (10 years)
    CivilGeneral,
    /// Contractual civil claims (3 years)
    CivilContract,
    /// Labor claims (2 years)
    Labor,
    /// Consumer claims (5 years)
    Consumer,
    /// Tax claims (5 years)
    Tax,
    /// Unrecognized prescription type; uses the general civil term
    Other(String),
}

impl PrescriptionKind {
    /// Statutory term in calendar years
    pub fn years(&self) -> i32 {
        match self {
            PrescriptionKind::CivilGeneral => 10,
            PrescriptionKind::CivilContract => 3,
            PrescriptionKind::Labor => 2,
            PrescriptionKind::Consumer => 5,
            PrescriptionKind::Tax => 5,
            PrescriptionKind::Other(_) => 10,
        }
    }
}

impl FromStr for PrescriptionKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "civil_general" => PrescriptionKind::CivilGeneral,
            "civil_contract" => PrescriptionKind::CivilContract,
            "labor" => PrescriptionKind::Labor,
            "consumer" => PrescriptionKind::Consumer,
            "tax" => PrescriptionKind::Tax,
            other => PrescriptionKind::Other(other.to_string()),
        })
    }
}

/// Projects procedural deadlines from a start date, honoring weekends and
/// jurisdictional holidays.
#[derive(Debug, Clone, Default)]
pub struct DeadlineCalculator {
    calendar: BusinessCalendar,
}

impl DeadlineCalculator {
    /// Create a calculator over the given holiday calendar
    pub fn new(calendar: BusinessCalendar) -> Self {
        Self { calendar }
    }

    /// The underlying calendar
    pub fn calendar(&self) -> &BusinessCalendar {
        &self.calendar
    }

    /// Project a deadline `business_days` business days after `start`.
    ///
    /// Counting starts the day after `start` (the "day zero" convention of
    /// procedural terms): the start date itself never counts, and a term
    /// of zero business days returns `start` unchanged.
    pub fn calculate_deadline(
        &self,
        start: NaiveDate,
        business_days: u32,
        state: Option<&str>,
        city: Option<&str>,
    ) -> NaiveDate {
        let mut current = start;
        let mut days_added = 0;

        while days_added < business_days {
            current += Duration::days(1);
            if self.calendar.is_business_day(current, state, city) {
                days_added += 1;
            }
        }

        current
    }

    /// Deadline for an appeal, counted from publication of the decision
    pub fn appeal_deadline(&self, publication_date: NaiveDate, state: Option<&str>) -> NaiveDate {
        self.calculate_deadline(publication_date, APPEAL_DAYS, state, None)
    }

    /// Deadline for a response (contestation), counted from citation
    pub fn response_deadline(&self, citation_date: NaiveDate, state: Option<&str>) -> NaiveDate {
        self.calculate_deadline(citation_date, RESPONSE_DAYS, state, None)
    }

    /// Deadline for an execution proceeding; term depends on the kind
    pub fn execution_deadline(
        &self,
        start: NaiveDate,
        kind: &ExecutionKind,
        state: Option<&str>,
    ) -> NaiveDate {
        self.calculate_deadline(start, kind.business_days(), state, None)
    }

    /// Prescription deadline: a calendar-year offset with no business-day
    /// adjustment. Feb 29 landing on a non-leap year normalizes to Mar 1.
    pub fn prescription_deadline(&self, start: NaiveDate, kind: &PrescriptionKind) -> NaiveDate {
        add_years(start, kind.years())
    }
}

/// Add calendar years; Feb 29 on a non-leap target year becomes Mar 1
fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(date)
}
