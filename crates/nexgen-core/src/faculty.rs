//! Faculty member records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
  Result,
  calendar::CalendarSpan,
  validation::{FACULTY_ID, blank_as_none, declared_rules, not_blank},
};

/// Years of service after which an assistant professor is tenured.
pub const ASSISTANT_TENURE_YEARS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacultyPosition {
  Professor,
  AssocProfessor,
  AsstProfessor,
  Lecturer,
  Instructor,
  Adjunct,
  Other,
}

impl FacultyPosition {
  pub fn label(self) -> &'static str {
    match self {
      Self::Professor => "Professor",
      Self::AssocProfessor => "Associate Professor",
      Self::AsstProfessor => "Assistant Professor",
      Self::Lecturer => "Lecturer",
      Self::Instructor => "Instructor",
      Self::Adjunct => "Adjunct Faculty",
      Self::Other => "Other",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyMember {
  pub profile_id:         Uuid,
  /// `F` followed by digits.
  pub faculty_id:         String,
  pub position:           FacultyPosition,
  pub hire_date:          NaiveDate,
  pub department:         String,
  pub highest_degree:     String,
  pub alma_mater:         Option<String>,
  pub office_location:    String,
  pub office_hours:       String,
  pub specialization:     String,
  pub research_interests: String,
}

impl FacultyMember {
  pub fn employment_duration(&self, today: NaiveDate) -> Option<CalendarSpan> {
    CalendarSpan::between(self.hire_date, today)
  }

  /// Professors and associate professors hold tenure outright; assistant
  /// professors earn it after [`ASSISTANT_TENURE_YEARS`] full years.
  pub fn is_tenured(&self, today: NaiveDate) -> bool {
    match self.position {
      FacultyPosition::Professor | FacultyPosition::AssocProfessor => true,
      FacultyPosition::AsstProfessor => self
        .employment_duration(today)
        .is_some_and(|span| span.years >= ASSISTANT_TENURE_YEARS),
      _ => false,
    }
  }
}

/// Input for creating or replacing a [`FacultyMember`] record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FacultyInput {
  #[validate(
    length(max = 20, message = "Faculty ID must be at most 20 characters."),
    regex(
      path = *FACULTY_ID,
      message = "Faculty ID must start with \"F\" followed by numbers."
    )
  )]
  pub faculty_id:         String,
  pub position:           FacultyPosition,
  pub hire_date:          NaiveDate,
  #[validate(custom(function = "not_blank"))]
  pub department:         String,
  #[serde(default)]
  pub highest_degree:     String,
  #[serde(default, deserialize_with = "blank_as_none")]
  pub alma_mater:         Option<String>,
  #[serde(default)]
  pub office_location:    String,
  #[serde(default)]
  pub office_hours:       String,
  #[serde(default)]
  pub specialization:     String,
  #[serde(default)]
  pub research_interests: String,
}

impl FacultyInput {
  pub fn check(&self, today: NaiveDate) -> Result<()> {
    let mut errors = declared_rules(self);
    if self.hire_date > today {
      errors.add("hire_date", "Hire date cannot be in the future.");
    }
    errors.into_result()
  }

  pub fn into_faculty(self, profile_id: Uuid) -> FacultyMember {
    FacultyMember {
      profile_id,
      faculty_id: self.faculty_id,
      position: self.position,
      hire_date: self.hire_date,
      department: self.department,
      highest_degree: self.highest_degree,
      alma_mater: self.alma_mater.filter(|a| !a.is_empty()),
      office_location: self.office_location,
      office_hours: self.office_hours,
      specialization: self.specialization,
      research_interests: self.research_interests,
    }
  }
}
