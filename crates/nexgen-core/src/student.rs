//! Student records and their derived academic figures.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
  Result,
  calendar::CalendarSpan,
  validation::{STUDENT_ID, declared_rules},
};

/// Shortest and longest accepted program lengths, in years.
pub const MIN_PROGRAM_YEARS: i64 = 2;
pub const MAX_PROGRAM_YEARS: i64 = 8;

/// Credits in a typical six-month term.
pub const CREDITS_PER_TERM: u32 = 15;

/// Default look-ahead for [`Student::is_graduating_soon`].
pub const GRADUATING_SOON_DAYS: i64 = 90;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AcademicStatus {
  #[default]
  Active,
  OnLeave,
  Graduated,
  Withdrawn,
  Suspended,
}

impl AcademicStatus {
  pub fn label(self) -> &'static str {
    match self {
      Self::Active => "Active",
      Self::OnLeave => "On Leave",
      Self::Graduated => "Graduated",
      Self::Withdrawn => "Withdrawn",
      Self::Suspended => "Suspended",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
  /// The owning profile; also this record's identity.
  pub profile_id:          Uuid,
  /// University-issued identifier, `S` followed by digits.
  pub student_id:          String,
  pub enrollment_date:     NaiveDate,
  pub expected_graduation: Option<NaiveDate>,
  pub major:               String,
  pub academic_status:     AcademicStatus,
  /// Grade point average, 0.00–4.00.
  pub gpa:                 Option<f64>,
  pub credits_completed:   u32,
}

impl Student {
  /// Time enrolled as of `today`; `None` if enrollment lies in the future.
  pub fn enrollment_duration(&self, today: NaiveDate) -> Option<CalendarSpan> {
    CalendarSpan::between(self.enrollment_date, today)
  }

  pub fn time_to_graduation(&self, today: NaiveDate) -> TimeToGraduation {
    let Some(expected) = self.expected_graduation else {
      return TimeToGraduation::NotSet;
    };
    match CalendarSpan::between(today, expected) {
      None => TimeToGraduation::Past,
      Some(span) if span.years > 0 => TimeToGraduation::Years {
        years:  span.years,
        months: span.months,
      },
      Some(span) if span.months > 0 => TimeToGraduation::Months {
        months: span.months,
        days:   span.days,
      },
      Some(span) => TimeToGraduation::Days(span.days),
    }
  }

  /// Whether the expected graduation date falls within `days` of `today`.
  /// Overdue students count as graduating soon.
  pub fn is_graduating_soon(&self, today: NaiveDate, days: i64) -> bool {
    self
      .expected_graduation
      .is_some_and(|expected| (expected - today).num_days() <= days)
  }

  /// `true` if at least 90% of the credits implied by the full program
  /// length (15 per six-month term) have been completed. `None` when the
  /// program length is unknown.
  pub fn is_on_track(&self) -> Option<bool> {
    let expected = self.expected_graduation?;
    let months = CalendarSpan::between(self.enrollment_date, expected)?
      .total_months();
    // credits >= 0.9 * (months / 6) * 15, kept in integers.
    let lhs = u64::from(self.credits_completed) * 60;
    let rhs = u64::from(months) * u64::from(CREDITS_PER_TERM) * 9;
    Some(lhs >= rhs)
  }
}

/// How long until a student's expected graduation, in the coarsest
/// non-zero unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeToGraduation {
  NotSet,
  Past,
  Years { years: u32, months: u32 },
  Months { months: u32, days: u32 },
  Days(u32),
}

impl fmt::Display for TimeToGraduation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::NotSet => f.write_str("No graduation date set"),
      Self::Past => f.write_str("Past expected graduation date"),
      Self::Years { years, months } => {
        write!(f, "{years} years, {months} months")
      }
      Self::Months { months, days } => write!(f, "{months} months, {days} days"),
      Self::Days(days) => write!(f, "{days} days"),
    }
  }
}

/// Input for creating or replacing a [`Student`] record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StudentInput {
  #[validate(
    length(max = 20, message = "Student ID must be at most 20 characters."),
    regex(
      path = *STUDENT_ID,
      message = "Student ID must start with \"S\" followed by numbers."
    )
  )]
  pub student_id:          String,
  pub enrollment_date:     NaiveDate,
  #[serde(default)]
  pub expected_graduation: Option<NaiveDate>,
  #[serde(default)]
  pub major:               String,
  #[serde(default)]
  pub academic_status:     AcademicStatus,
  #[validate(range(min = 0.0, max = 4.0, message = "GPA must be between 0.00 and 4.00."))]
  #[serde(default)]
  pub gpa:                 Option<f64>,
  #[serde(default)]
  pub credits_completed:   u32,
}

impl StudentInput {
  pub fn check(&self, today: NaiveDate) -> Result<()> {
    let mut errors = declared_rules(self);

    if self.enrollment_date > today {
      errors.add("enrollment_date", "Enrollment date cannot be in the future.");
    }

    if let Some(expected) = self.expected_graduation {
      if expected <= self.enrollment_date {
        errors.add(
          "expected_graduation",
          "Expected graduation must be after enrollment date.",
        );
      } else {
        // Program length in years is days / 365.25; compare as quarters.
        let quarter_days = (expected - self.enrollment_date).num_days() * 4;
        if quarter_days < MIN_PROGRAM_YEARS * 1461 {
          errors.add(
            "expected_graduation",
            format!(
              "Graduation date should be at least {MIN_PROGRAM_YEARS} years \
               after enrollment."
            ),
          );
        } else if quarter_days > MAX_PROGRAM_YEARS * 1461 {
          errors.add(
            "expected_graduation",
            format!(
              "Graduation date should be within {MAX_PROGRAM_YEARS} years of \
               enrollment."
            ),
          );
        }
      }
    }

    if let Some(gpa) = self.gpa
      && !errors.contains("gpa")
      && ((gpa * 100.0).round() - gpa * 100.0).abs() > 1e-6
    {
      errors.add("gpa", "GPA may have at most two decimal places.");
    }

    errors.into_result()
  }

  pub fn into_student(self, profile_id: Uuid) -> Student {
    Student {
      profile_id,
      student_id: self.student_id,
      enrollment_date: self.enrollment_date,
      expected_graduation: self.expected_graduation,
      major: self.major,
      academic_status: self.academic_status,
      gpa: self.gpa,
      credits_completed: self.credits_completed,
    }
  }
}
