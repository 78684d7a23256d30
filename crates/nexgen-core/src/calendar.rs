//! Calendar-aware date differences.
//!
//! Spans are measured the way people count birthdays and anniversaries: whole
//! months are added to the start date (clamping to the end of shorter months)
//! and whatever remains is counted in days. A fixed 365-day year is never
//! assumed.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// The difference between two dates as years, months and days.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub struct CalendarSpan {
  pub years:  u32,
  /// 0–11.
  pub months: u32,
  /// Days remaining after the last whole month.
  pub days:   u32,
}

impl CalendarSpan {
  /// The span from `start` to `end`, or `None` if `end` precedes `start`.
  pub fn between(start: NaiveDate, end: NaiveDate) -> Option<Self> {
    if end < start {
      return None;
    }

    let mut months = u32::try_from(
      (end.year() - start.year()) * 12 + end.month() as i32
        - start.month() as i32,
    )
    .ok()?;
    let mut anchor = start.checked_add_months(Months::new(months))?;
    while anchor > end {
      months = months.checked_sub(1)?;
      anchor = start.checked_add_months(Months::new(months))?;
    }

    let days = u32::try_from((end - anchor).num_days()).ok()?;
    Some(Self { years: months / 12, months: months % 12, days })
  }

  pub fn total_months(&self) -> u32 { self.years * 12 + self.months }
}

impl fmt::Display for CalendarSpan {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} years, {} months", self.years, self.months)
  }
}

/// Whole years elapsed from `start` to `end`; `None` if `end` is earlier.
pub fn whole_years(start: NaiveDate, end: NaiveDate) -> Option<u32> {
  CalendarSpan::between(start, end).map(|s| s.years)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  #[test]
  fn same_day_is_zero() {
    assert_eq!(
      CalendarSpan::between(d(2024, 5, 5), d(2024, 5, 5)),
      Some(CalendarSpan::default())
    );
  }

  #[test]
  fn counts_years_months_days() {
    let span = CalendarSpan::between(d(2020, 9, 1), d(2024, 6, 15)).unwrap();
    assert_eq!(span, CalendarSpan { years: 3, months: 9, days: 14 });
    assert_eq!(span.total_months(), 45);
    assert_eq!(span.to_string(), "3 years, 9 months");
  }

  #[test]
  fn day_before_anniversary_is_not_a_full_year() {
    assert_eq!(whole_years(d(2000, 3, 10), d(2016, 3, 9)), Some(15));
    assert_eq!(whole_years(d(2000, 3, 10), d(2016, 3, 10)), Some(16));
  }

  #[test]
  fn month_end_clamping() {
    // Jan 31 + 1 month clamps to Feb 29 in a leap year.
    let span = CalendarSpan::between(d(2024, 1, 31), d(2024, 3, 1)).unwrap();
    assert_eq!(span, CalendarSpan { years: 0, months: 1, days: 1 });

    // Jan 31 + 1 month clamps to Feb 28, which is already the end date.
    let span = CalendarSpan::between(d(2023, 1, 31), d(2023, 2, 28)).unwrap();
    assert_eq!(span, CalendarSpan { years: 0, months: 1, days: 0 });

    let span = CalendarSpan::between(d(2023, 1, 31), d(2023, 2, 27)).unwrap();
    assert_eq!(span, CalendarSpan { years: 0, months: 0, days: 27 });
  }

  #[test]
  fn leap_day_birthdays() {
    assert_eq!(whole_years(d(2004, 2, 29), d(2020, 2, 28)), Some(15));
    assert_eq!(whole_years(d(2004, 2, 29), d(2020, 2, 29)), Some(16));
  }

  #[test]
  fn reversed_range_is_none() {
    assert_eq!(CalendarSpan::between(d(2024, 1, 2), d(2024, 1, 1)), None);
  }
}
