//! Read models returned by the API: stored fields plus derived values.
//!
//! Derived values are computed against an explicit `today` supplied by the
//! handler, never stored.

use chrono::{NaiveDate, Utc};
use nexgen_core::{
  address::Address,
  alumni::{Alumni, AlumniDetails},
  faculty::FacultyMember,
  profile::{ContactInfo, Profile},
  role::{ProfileView, RoleRecord},
  staff::StaffMember,
  student::{GRADUATING_SOON_DAYS, Student},
  user::User,
};
use serde::Serialize;

/// The reference date for derived values: the current UTC calendar date.
pub fn today() -> NaiveDate { Utc::now().date_naive() }

// ─── Profiles ────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProfileDetail {
  #[serde(flatten)]
  pub profile:           Profile,
  pub username:          String,
  pub full_name:         String,
  pub email:             String,
  pub user_type_display: &'static str,
  pub age:               Option<u32>,
  pub contact_info:      ContactInfo,
  pub address:           Option<Address>,
  pub role:              RoleRecord,
}

impl ProfileDetail {
  pub fn new(view: ProfileView, today: NaiveDate) -> Self {
    let ProfileView { user, profile, address, role } = view;
    Self {
      username: user.username.clone(),
      full_name: user.display_name(),
      email: user.email.clone(),
      user_type_display: profile.user_type.label(),
      age: profile.age(today),
      contact_info: profile.contact_info(&user, address.as_ref()),
      address,
      role,
      profile,
    }
  }
}

// ─── Role records ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StudentView {
  #[serde(flatten)]
  pub student:                 Student,
  pub academic_status_display: &'static str,
  pub enrollment_duration:     Option<String>,
  pub time_to_graduation:      String,
  pub is_graduating_soon:      bool,
  pub is_on_track:             Option<bool>,
}

impl StudentView {
  pub fn new(student: Student, today: NaiveDate) -> Self {
    Self {
      academic_status_display: student.academic_status.label(),
      enrollment_duration: student.enrollment_duration(today).map(|s| s.to_string()),
      time_to_graduation: student.time_to_graduation(today).to_string(),
      is_graduating_soon: student.is_graduating_soon(today, GRADUATING_SOON_DAYS),
      is_on_track: student.is_on_track(),
      student,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct FacultyView {
  #[serde(flatten)]
  pub faculty:             FacultyMember,
  pub position_display:    &'static str,
  pub employment_duration: Option<String>,
  pub is_tenured:          bool,
}

impl FacultyView {
  pub fn new(faculty: FacultyMember, today: NaiveDate) -> Self {
    Self {
      position_display: faculty.position.label(),
      employment_duration: faculty.employment_duration(today).map(|s| s.to_string()),
      is_tenured: faculty.is_tenured(today),
      faculty,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct StaffView {
  #[serde(flatten)]
  pub staff:                StaffMember,
  pub admin_level_display:  &'static str,
  pub employment_duration:  Option<String>,
  pub department_hierarchy: String,
  pub supervisor_name:      Option<String>,
  pub subordinate_count:    usize,
}

/// What a [`StaffView`] needs to know about the member's surroundings.
pub struct StaffContext {
  pub supervisor:        Option<StaffMember>,
  pub supervisor_name:   Option<String>,
  pub subordinate_count: usize,
}

impl StaffView {
  pub fn new(staff: StaffMember, context: StaffContext, today: NaiveDate) -> Self {
    Self {
      admin_level_display: staff.admin_level.label(),
      employment_duration: staff.employment_duration(today).map(|s| s.to_string()),
      department_hierarchy: staff.department_hierarchy(context.supervisor.as_ref()),
      supervisor_name: context.supervisor_name,
      subordinate_count: context.subordinate_count,
      staff,
    }
  }
}

// ─── Alumni ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AlumniView {
  #[serde(flatten)]
  pub alumni:                 Alumni,
  pub years_since_graduation: i32,
  pub engagement_display:     &'static str,
  pub details:                AlumniDetails,
}

impl AlumniView {
  /// `graduate` is the account the alumni record ultimately belongs to.
  pub fn new(alumni: Alumni, graduate: &User, today: NaiveDate) -> Self {
    Self {
      years_since_graduation: alumni.years_since_graduation(today),
      engagement_display: alumni.engagement_level.label(),
      details: alumni.details(&graduate.display_name(), &graduate.email, today),
      alumni,
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone as _, Utc};
  use nexgen_core::{
    staff::AdminLevel,
    student::AcademicStatus,
  };
  use uuid::Uuid;

  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  #[test]
  fn student_view_flattens_record_and_derived_fields() {
    let student = Student {
      profile_id:          Uuid::new_v4(),
      student_id:          "S10001".into(),
      enrollment_date:     d(2020, 9, 1),
      expected_graduation: Some(d(2024, 6, 1)),
      major:               "Economics".into(),
      academic_status:     AcademicStatus::OnLeave,
      gpa:                 None,
      credits_completed:   10,
    };
    let json = serde_json::to_value(StudentView::new(student, d(2024, 3, 15))).unwrap();

    assert_eq!(json["student_id"], "S10001");
    assert_eq!(json["academic_status"], "on_leave");
    assert_eq!(json["academic_status_display"], "On Leave");
    assert_eq!(json["enrollment_duration"], "3 years, 6 months");
    assert_eq!(json["time_to_graduation"], "2 months, 17 days");
    assert_eq!(json["is_graduating_soon"], true);
    assert_eq!(json["is_on_track"], false);
  }

  #[test]
  fn staff_view_names_supervisor() {
    let boss = StaffMember {
      profile_id:       Uuid::new_v4(),
      staff_id:         "A1".into(),
      department:       "Finance".into(),
      position:         "Director".into(),
      hire_date:        d(2010, 1, 1),
      responsibilities: String::new(),
      supervisor_id:    None,
      admin_level:      AdminLevel::FullAccess,
    };
    let clerk = StaffMember {
      profile_id: Uuid::new_v4(),
      staff_id: "A2".into(),
      position: "Accountant".into(),
      supervisor_id: Some(boss.profile_id),
      admin_level: AdminLevel::Basic,
      ..boss.clone()
    };

    let view = StaffView::new(
      clerk,
      StaffContext {
        supervisor:        Some(boss),
        supervisor_name:   Some("Rustam Aliyev".into()),
        subordinate_count: 0,
      },
      d(2024, 1, 1),
    );
    assert_eq!(view.department_hierarchy, "Finance → Accountant (Reports to: Director)");
    assert_eq!(view.admin_level_display, "Basic");
    assert_eq!(view.employment_duration.as_deref(), Some("14 years, 0 months"));
  }

  #[test]
  fn profile_detail_uses_display_fallbacks() {
    let user = User {
      user_id:     Uuid::new_v4(),
      username:    "guest".into(),
      email:       "guest@nexgen.uz".into(),
      first_name:  String::new(),
      last_name:   String::new(),
      date_joined: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    };
    let profile = Profile::new(user.user_id, user.date_joined);
    let detail = ProfileDetail::new(
      ProfileView { user, profile, address: None, role: RoleRecord::None },
      d(2024, 1, 1),
    );

    assert_eq!(detail.full_name, "guest");
    assert_eq!(detail.user_type_display, "Other");
    assert_eq!(detail.age, None);
    assert_eq!(detail.contact_info.phone, "Not provided");
    assert_eq!(detail.contact_info.address, "No address registered");
  }
}
