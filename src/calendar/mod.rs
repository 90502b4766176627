//! Business-day calendar over a jurisdiction-aware holiday set

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashMap;

use crate::traits::HolidayStore;
use crate::types::{CoreResult, HolidayRecord};

/// Jurisdiction tags of one holiday occurrence, indexed by date
#[derive(Debug, Clone)]
struct HolidayScope {
    is_national: bool,
    state: Option<String>,
    city: Option<String>,
}

/// Immutable snapshot of holidays with O(1) date lookup.
///
/// The calendar is constructed once from a set of [`HolidayRecord`]s and
/// never refreshed in place; callers that need newer data rebuild it.
/// Missing holiday data is fail-open: a date with no loaded record is
/// simply not a holiday.
#[derive(Debug, Clone, Default)]
pub struct BusinessCalendar {
    holidays: HashMap<NaiveDate, Vec<HolidayScope>>,
}

impl BusinessCalendar {
    /// Build a calendar from an in-memory holiday snapshot
    pub fn from_records(records: Vec<HolidayRecord>) -> Self {
        let mut holidays: HashMap<NaiveDate, Vec<HolidayScope>> = HashMap::new();
        for record in records {
            holidays.entry(record.date).or_default().push(HolidayScope {
                is_national: record.is_national,
                state: record.state,
                city: record.city,
            });
        }
        Self { holidays }
    }

    /// Build a calendar by loading the given year and the next one from
    /// the holiday store (deadlines routinely project into next year)
    pub async fn load(store: &dyn HolidayStore, year: i32) -> CoreResult<Self> {
        let mut records = store.find_by_year(year).await?;
        records.extend(store.find_by_year(year + 1).await?);
        Ok(Self::from_records(records))
    }

    /// Check whether a date is a holiday for the given jurisdiction.
    ///
    /// A record matches if it is national, or its state equals `state`,
    /// or its city equals `city`. Omitted state/city skip those clauses.
    pub fn is_holiday(&self, date: NaiveDate, state: Option<&str>, city: Option<&str>) -> bool {
        let Some(scopes) = self.holidays.get(&date) else {
            return false;
        };
        scopes.iter().any(|scope| {
            scope.is_national
                || (state.is_some() && scope.state.as_deref() == state)
                || (city.is_some() && scope.city.as_deref() == city)
        })
    }

    /// Check whether a date is a business day: not a weekend and not a
    /// holiday applicable to the jurisdiction
    pub fn is_business_day(&self, date: NaiveDate, state: Option<&str>, city: Option<&str>) -> bool {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        !self.is_holiday(date, state, city)
    }

    /// The first business day strictly after `date`
    pub fn next_business_day(
        &self,
        date: NaiveDate,
        state: Option<&str>,
        city: Option<&str>,
    ) -> NaiveDate {
        let mut next = date + Duration::days(1);
        while !self.is_business_day(next, state, city) {
            next += Duration::days(1);
        }
        next
    }

    /// The last business day strictly before `date`
    pub fn previous_business_day(
        &self,
        date: NaiveDate,
        state: Option<&str>,
        city: Option<&str>,
    ) -> NaiveDate {
        let mut previous = date - Duration::days(1);
        while !self.is_business_day(previous, state, city) {
            previous -= Duration::days(1);
        }
        previous
    }

    /// Count business days in the closed interval [start, end]
    pub fn count_business_days(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        state: Option<&str>,
        city: Option<&str>,
    ) -> u32 {
        let mut current = start;
        let mut count = 0;
        while current <= end {
            if self.is_business_day(current, state, city) {
                count += 1;
            }
            current += Duration::days(1);
        }
        count
    }
}

/// Gregorian Easter Sunday for the given year (anonymous Gauss algorithm).
///
/// Pure function of the year; always lands between March 22 and April 25.
pub fn easter_sunday(year: i32) -> NaiveDate {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .expect("Easter computation always yields a valid March/April date")
}

/// Brazilian national holidays for a year: the eight fixed dates plus the
/// two movable feasts derived from Easter (Good Friday, Corpus Christi).
pub fn national_holidays(year: i32) -> Vec<HolidayRecord> {
    let fixed = [
        ("Confraternização Universal", 1, 1),
        ("Tiradentes", 4, 21),
        ("Dia do Trabalhador", 5, 1),
        ("Independência do Brasil", 9, 7),
        ("Nossa Senhora Aparecida", 10, 12),
        ("Finados", 11, 2),
        ("Proclamação da República", 11, 15),
        ("Natal", 12, 25),
    ];

    let mut holidays: Vec<HolidayRecord> = fixed
        .iter()
        .filter_map(|&(name, month, day)| {
            NaiveDate::from_ymd_opt(year, month, day)
                .map(|date| HolidayRecord::national(name, date))
        })
        .collect();

    let easter = easter_sunday(year);
    holidays.push(HolidayRecord::national(
        "Sexta-feira Santa",
        easter - Duration::days(2),
    ));
    holidays.push(HolidayRecord::national(
        "Corpus Christi",
        easter + Duration::days(60),
    ));

    holidays
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn easter_known_years() {
        assert_eq!(easter_sunday(2024), date(2024, 3, 31));
        assert_eq!(easter_sunday(2025), date(2025, 4, 20));
        assert_eq!(easter_sunday(2026), date(2026, 4, 5));
        assert_eq!(easter_sunday(2008), date(2008, 3, 23));
        assert_eq!(easter_sunday(1943), date(1943, 4, 25));
        assert_eq!(easter_sunday(1818), date(1818, 3, 22));
    }

    #[test]
    fn easter_stays_within_calendar_bounds() {
        for year in 1600..2400 {
            let easter = easter_sunday(year);
            let lower = date(year, 3, 22);
            let upper = date(year, 4, 25);
            assert!(
                easter >= lower && easter <= upper,
                "easter {} out of bounds for {}",
                easter,
                year
            );
        }
    }

    #[test]
    fn national_holidays_include_movable_feasts() {
        let holidays = national_holidays(2024);
        assert_eq!(holidays.len(), 10);
        // Easter 2024 is March 31
        assert!(holidays
            .iter()
            .any(|h| h.name == "Sexta-feira Santa" && h.date == date(2024, 3, 29)));
        assert!(holidays
            .iter()
            .any(|h| h.name == "Corpus Christi" && h.date == date(2024, 5, 30)));
        assert!(holidays.iter().all(|h| h.is_national));
    }

    #[test]
    fn weekends_are_never_business_days() {
        let calendar = BusinessCalendar::default();
        // 2024-01-06 is a Saturday, 2024-01-07 a Sunday
        assert!(!calendar.is_business_day(date(2024, 1, 6), None, None));
        assert!(!calendar.is_business_day(date(2024, 1, 7), None, None));
        assert!(calendar.is_business_day(date(2024, 1, 8), None, None));
    }

    #[test]
    fn holiday_matching_respects_jurisdiction() {
        let day = date(2024, 7, 9);
        let calendar = BusinessCalendar::from_records(vec![
            HolidayRecord::state("Revolução Constitucionalista", day, "SP"),
            HolidayRecord::city("Aniversário da Cidade", date(2024, 1, 25), "São Paulo"),
        ]);

        // State holiday only applies when the query names the state
        assert!(calendar.is_holiday(day, Some("SP"), None));
        assert!(!calendar.is_holiday(day, Some("RJ"), None));
        assert!(!calendar.is_holiday(day, None, None));

        // City holiday only applies when the query names the city
        assert!(calendar.is_holiday(date(2024, 1, 25), None, Some("São Paulo")));
        assert!(!calendar.is_holiday(date(2024, 1, 25), Some("SP"), None));
    }

    #[test]
    fn national_holiday_applies_everywhere() {
        let calendar = BusinessCalendar::from_records(national_holidays(2024));
        let christmas = date(2024, 12, 25);
        assert!(calendar.is_holiday(christmas, None, None));
        assert!(calendar.is_holiday(christmas, Some("SP"), Some("Campinas")));
        assert!(!calendar.is_business_day(christmas, None, None));
    }

    #[test]
    fn next_business_day_skips_weekend_and_holiday() {
        let calendar = BusinessCalendar::from_records(national_holidays(2024));
        // Friday Nov 1 2024; Saturday, Sunday, then Finados... Nov 2 is a
        // Saturday so Monday Nov 4 is next.
        assert_eq!(
            calendar.next_business_day(date(2024, 11, 1), None, None),
            date(2024, 11, 4)
        );
        // Tuesday Dec 24 2024 -> Dec 25 is Christmas -> Thursday Dec 26
        assert_eq!(
            calendar.next_business_day(date(2024, 12, 24), None, None),
            date(2024, 12, 26)
        );
    }

    #[test]
    fn next_business_day_is_strictly_greater_and_business() {
        let calendar = BusinessCalendar::from_records(national_holidays(2024));
        let mut day = date(2024, 1, 1);
        for _ in 0..60 {
            let next = calendar.next_business_day(day, None, None);
            assert!(next > day);
            assert!(calendar.is_business_day(next, None, None));
            day = next;
        }
    }

    #[test]
    fn previous_business_day_walks_backwards() {
        let calendar = BusinessCalendar::from_records(national_holidays(2024));
        // Monday Dec 30 2024 -> Friday Dec 27
        assert_eq!(
            calendar.previous_business_day(date(2024, 12, 30), None, None),
            date(2024, 12, 27)
        );
        // Thursday Dec 26 -> Dec 25 is Christmas -> Tuesday Dec 24
        assert_eq!(
            calendar.previous_business_day(date(2024, 12, 26), None, None),
            date(2024, 12, 24)
        );
    }

    #[test]
    fn count_business_days_is_inclusive() {
        let calendar = BusinessCalendar::default();
        // Mon Jan 8 .. Fri Jan 12 2024
        assert_eq!(
            calendar.count_business_days(date(2024, 1, 8), date(2024, 1, 12), None, None),
            5
        );
        // Whole week including weekend
        assert_eq!(
            calendar.count_business_days(date(2024, 1, 8), date(2024, 1, 14), None, None),
            5
        );
        // Single qualifying day
        assert_eq!(
            calendar.count_business_days(date(2024, 1, 8), date(2024, 1, 8), None, None),
            1
        );
        // Empty interval
        assert_eq!(
            calendar.count_business_days(date(2024, 1, 9), date(2024, 1, 8), None, None),
            0
        );
    }
}
