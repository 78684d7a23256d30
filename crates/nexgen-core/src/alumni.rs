//! Alumni — post-graduation records attached to a student.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
  Result,
  validation::{blank_as_none, declared_rules},
};

/// No one graduated before the university opened.
pub const FOUNDING_YEAR: i32 = 1950;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize,
  Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum EngagementLevel {
  #[default]
  Low = 1,
  Medium = 2,
  High = 3,
}

impl EngagementLevel {
  pub fn label(self) -> &'static str {
    match self {
      Self::Low => "Low",
      Self::Medium => "Medium",
      Self::High => "High",
    }
  }
}

impl TryFrom<u8> for EngagementLevel {
  type Error = String;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      1 => Ok(Self::Low),
      2 => Ok(Self::Medium),
      3 => Ok(Self::High),
      other => Err(format!("engagement level must be 1-3, got {other}")),
    }
  }
}

impl From<EngagementLevel> for u8 {
  fn from(level: EngagementLevel) -> Self { level as u8 }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alumni {
  /// The graduate's profile id, shared with their student record.
  pub profile_id:        Uuid,
  pub graduation_year:   i32,
  pub degree:            String,
  pub current_employer:  String,
  pub job_title:         String,
  pub personal_email:    Option<String>,
  pub is_donor:          bool,
  pub last_contact_date: Option<NaiveDate>,
  pub engagement_level:  EngagementLevel,
}

impl Alumni {
  /// Calendar-year difference, not elapsed time.
  pub fn years_since_graduation(&self, today: NaiveDate) -> i32 {
    today.year() - self.graduation_year
  }

  /// Summary for display. `name` and `account_email` come from the
  /// graduate's user identity.
  pub fn details(
    &self,
    name: &str,
    account_email: &str,
    today: NaiveDate,
  ) -> AlumniDetails {
    fn or_not_provided(value: &str) -> String {
      if value.is_empty() {
        "Not provided".to_owned()
      } else {
        value.to_owned()
      }
    }

    AlumniDetails {
      name:                   name.to_owned(),
      graduation_year:        self.graduation_year,
      degree:                 self.degree.clone(),
      years_since_graduation: self.years_since_graduation(today),
      employer:               or_not_provided(&self.current_employer),
      position:               or_not_provided(&self.job_title),
      contact:                self
        .personal_email
        .clone()
        .unwrap_or_else(|| account_email.to_owned()),
      engagement:             self.engagement_level.label().to_owned(),
      is_donor:               if self.is_donor { "Yes" } else { "No" }.to_owned(),
    }
  }
}

/// Display-ready summary of an alumni record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlumniDetails {
  pub name:                   String,
  pub graduation_year:        i32,
  pub degree:                 String,
  pub years_since_graduation: i32,
  pub employer:               String,
  pub position:               String,
  pub contact:                String,
  pub engagement:             String,
  pub is_donor:               String,
}

/// Input for creating or replacing an [`Alumni`] record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AlumniInput {
  #[validate(range(
    min = FOUNDING_YEAR,
    message = "Graduation year cannot be before university founding in 1950."
  ))]
  pub graduation_year:   i32,
  #[serde(default)]
  pub degree:            String,
  #[serde(default)]
  pub current_employer:  String,
  #[serde(default)]
  pub job_title:         String,
  #[validate(email(message = "Enter a valid email address."))]
  #[serde(default, deserialize_with = "blank_as_none")]
  pub personal_email:    Option<String>,
  #[serde(default)]
  pub is_donor:          bool,
  #[serde(default)]
  pub last_contact_date: Option<NaiveDate>,
  #[serde(default)]
  pub engagement_level:  EngagementLevel,
}

impl AlumniInput {
  /// `enrollment_date` is the linked student's; `account_email` is the
  /// graduate's university address.
  pub fn check(
    &self,
    enrollment_date: NaiveDate,
    account_email: &str,
    today: NaiveDate,
  ) -> Result<()> {
    let mut errors = declared_rules(self);

    if !errors.contains("graduation_year") {
      if self.graduation_year > today.year() {
        errors.add("graduation_year", "Graduation year cannot be in the future.");
      } else if self.graduation_year < enrollment_date.year() {
        errors.add(
          "graduation_year",
          "Graduation year cannot be before enrollment year.",
        );
      }
    }

    if let Some(date) = self.last_contact_date
      && date > today
    {
      errors.add("last_contact_date", "Last contact date cannot be in the future.");
    }

    if let Some(email) = self.personal_email.as_deref()
      && !errors.contains("personal_email")
      && email.eq_ignore_ascii_case(account_email)
    {
      errors.add(
        "personal_email",
        "Personal email should be different from your university email.",
      );
    }

    errors.into_result()
  }

  pub fn into_alumni(self, profile_id: Uuid) -> Alumni {
    Alumni {
      profile_id,
      graduation_year: self.graduation_year,
      degree: self.degree,
      current_employer: self.current_employer,
      job_title: self.job_title,
      personal_email: self.personal_email.filter(|e| !e.is_empty()),
      is_donor: self.is_donor,
      last_contact_date: self.last_contact_date,
      engagement_level: self.engagement_level,
    }
  }
}
