//! Administrative staff records.
//!
//! Staff members form a supervision tree via [`StaffMember::supervisor_id`];
//! the integrity rules for that tree live in [`crate::hierarchy`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
  Result,
  calendar::CalendarSpan,
  validation::{STAFF_ID, declared_rules, not_blank},
};

/// System access granted to a staff member. Ordered from least to most.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Default,
  Serialize,
  Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum AdminLevel {
  #[default]
  Basic = 1,
  Intermediate = 2,
  Advanced = 3,
  FullAccess = 4,
}

impl AdminLevel {
  pub fn label(self) -> &'static str {
    match self {
      Self::Basic => "Basic",
      Self::Intermediate => "Intermediate",
      Self::Advanced => "Advanced",
      Self::FullAccess => "Full Access",
    }
  }
}

impl TryFrom<u8> for AdminLevel {
  type Error = String;

  fn try_from(value: u8) -> Result<Self, Self::Error> {
    match value {
      1 => Ok(Self::Basic),
      2 => Ok(Self::Intermediate),
      3 => Ok(Self::Advanced),
      4 => Ok(Self::FullAccess),
      other => Err(format!("admin level must be 1-4, got {other}")),
    }
  }
}

impl From<AdminLevel> for u8 {
  fn from(level: AdminLevel) -> Self { level as u8 }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
  pub profile_id:       Uuid,
  /// `A` followed by digits.
  pub staff_id:         String,
  pub department:       String,
  pub position:         String,
  pub hire_date:        NaiveDate,
  pub responsibilities: String,
  /// Profile id of the supervising staff member.
  pub supervisor_id:    Option<Uuid>,
  pub admin_level:      AdminLevel,
}

impl StaffMember {
  pub fn employment_duration(&self, today: NaiveDate) -> Option<CalendarSpan> {
    CalendarSpan::between(self.hire_date, today)
  }

  /// "Department → Position", plus the supervisor's position when known.
  pub fn department_hierarchy(&self, supervisor: Option<&StaffMember>) -> String {
    match supervisor {
      Some(sup) => format!(
        "{} → {} (Reports to: {})",
        self.department, self.position, sup.position
      ),
      None => format!("{} → {}", self.department, self.position),
    }
  }
}

/// Input for creating or replacing a [`StaffMember`] record.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StaffInput {
  #[validate(
    length(max = 20, message = "Staff ID must be at most 20 characters."),
    regex(
      path = *STAFF_ID,
      message = "Staff ID must start with \"A\" followed by numbers."
    )
  )]
  pub staff_id:         String,
  #[validate(custom(function = "not_blank"))]
  pub department:       String,
  #[validate(custom(function = "not_blank"))]
  pub position:         String,
  pub hire_date:        NaiveDate,
  #[serde(default)]
  pub responsibilities: String,
  #[serde(default)]
  pub supervisor_id:    Option<Uuid>,
  #[serde(default)]
  pub admin_level:      AdminLevel,
}

impl StaffInput {
  /// Checks on this record alone. Supervisor rules need the stored tree and
  /// are applied by the store through [`crate::hierarchy`].
  pub fn check(&self, today: NaiveDate) -> Result<()> {
    let mut errors = declared_rules(self);
    if self.hire_date > today {
      errors.add("hire_date", "Hire date cannot be in the future.");
    }
    errors.into_result()
  }

  pub fn into_staff(self, profile_id: Uuid) -> StaffMember {
    StaffMember {
      profile_id,
      staff_id: self.staff_id,
      department: self.department,
      position: self.position,
      hire_date: self.hire_date,
      responsibilities: self.responsibilities,
      supervisor_id: self.supervisor_id,
      admin_level: self.admin_level,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  fn input() -> StaffInput {
    StaffInput {
      staff_id:         "A300".into(),
      department:       "Registrar".into(),
      position:         "Records Officer".into(),
      hire_date:        d(2019, 4, 1),
      responsibilities: String::new(),
      supervisor_id:    None,
      admin_level:      AdminLevel::Intermediate,
    }
  }

  #[test]
  fn admin_level_serde_is_numeric_and_bounded() {
    assert_eq!(serde_json::to_string(&AdminLevel::Advanced).unwrap(), "3");
    let level: AdminLevel = serde_json::from_str("4").unwrap();
    assert_eq!(level, AdminLevel::FullAccess);
    assert!(serde_json::from_str::<AdminLevel>("5").is_err());
    assert!(serde_json::from_str::<AdminLevel>("0").is_err());
  }

  #[test]
  fn missing_admin_level_defaults_to_basic() {
    let parsed: StaffInput = serde_json::from_str(
      r#"{"staff_id":"A1","department":"IT","position":"Tech","hire_date":"2020-01-01"}"#,
    )
    .unwrap();
    assert_eq!(parsed.admin_level, AdminLevel::Basic);
  }

  #[test]
  fn field_rules() {
    assert!(input().check(d(2024, 1, 1)).is_ok());

    let mut bad = input();
    bad.staff_id = "S300".into();
    bad.hire_date = d(2030, 1, 1);
    let Err(crate::Error::Validation(errors)) = bad.check(d(2024, 1, 1)) else {
      panic!("expected validation failure");
    };
    assert_eq!(
      errors.get("staff_id"),
      ["Staff ID must start with \"A\" followed by numbers."]
    );
    assert!(errors.contains("hire_date"));
    assert!(!errors.contains("position"));

    let blank = StaffInput { position: "\t".into(), ..input() };
    let Err(crate::Error::Validation(errors)) = blank.check(d(2024, 1, 1)) else {
      panic!("blank position accepted");
    };
    assert_eq!(errors.get("position"), ["This field may not be blank."]);
  }

  #[test]
  fn department_hierarchy_mentions_supervisor() {
    let boss = StaffInput { position: "Registrar".into(), ..input() }
      .into_staff(Uuid::new_v4());
    let clerk = input().into_staff(Uuid::new_v4());
    assert_eq!(clerk.department_hierarchy(None), "Registrar → Records Officer");
    assert_eq!(
      clerk.department_hierarchy(Some(&boss)),
      "Registrar → Records Officer (Reports to: Registrar)"
    );
  }
}
