//! Deadline calculation walkthrough: holidays, business days and the
//! statutory terms.

use chrono::NaiveDate;
use juris_core::{
    national_holidays, BusinessCalendar, DeadlineCalculator, ExecutionKind, PrescriptionKind,
};

fn main() {
    let mut holidays = national_holidays(2024);
    holidays.extend(national_holidays(2025));
    let calculator = DeadlineCalculator::new(BusinessCalendar::from_records(holidays));

    let publication = NaiveDate::from_ymd_opt(2024, 12, 19).expect("valid date");
    println!("Decision published on {publication}");
    println!(
        "Appeal deadline (15 business days): {}",
        calculator.appeal_deadline(publication, Some("SP"))
    );
    println!(
        "Response deadline: {}",
        calculator.response_deadline(publication, Some("SP"))
    );

    for kind in [
        ExecutionKind::Payment,
        ExecutionKind::ObligationToDo,
        ExecutionKind::ObligationNotToDo,
    ] {
        println!(
            "Execution deadline ({kind:?}, {} business days): {}",
            kind.business_days(),
            calculator.execution_deadline(publication, &kind, None)
        );
    }

    println!(
        "Prescription (consumer, {} years): {}",
        PrescriptionKind::Consumer.years(),
        calculator.prescription_deadline(publication, &PrescriptionKind::Consumer)
    );

    let calendar = calculator.calendar();
    println!(
        "Business days in Dec 2024: {}",
        calendar.count_business_days(
            NaiveDate::from_ymd_opt(2024, 12, 1).expect("valid date"),
            NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid date"),
            None,
            None,
        )
    );
}
