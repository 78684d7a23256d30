//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, calendar dates are `YYYY-MM-DD` (so
//! string comparison orders them), UUIDs are hyphenated lowercase strings and
//! enum choices are their lowercase codes.

use chrono::{DateTime, NaiveDate, Utc};
use nexgen_core::{
  address::Address,
  alumni::{Alumni, EngagementLevel},
  faculty::{FacultyMember, FacultyPosition},
  profile::{Profile, UserType},
  staff::{AdminLevel, StaffMember},
  student::{AcademicStatus, Student},
  user::User,
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

fn decode_opt_uuid(s: Option<String>) -> Result<Option<Uuid>> {
  s.as_deref().map(decode_uuid).transpose()
}

// ─── Dates ───────────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

fn decode_opt_date(s: Option<String>) -> Result<Option<NaiveDate>> {
  s.as_deref().map(decode_date).transpose()
}

// ─── Choice columns ──────────────────────────────────────────────────────────

fn unknown(column: &'static str, value: &str) -> Error {
  Error::UnknownDiscriminant { column, value: value.to_owned() }
}

pub fn encode_user_type(t: UserType) -> &'static str {
  match t {
    UserType::Student => "student",
    UserType::Faculty => "faculty",
    UserType::Staff => "staff",
    UserType::Admin => "admin",
    UserType::Other => "other",
  }
}

pub fn decode_user_type(s: &str) -> Result<UserType> {
  match s {
    "student" => Ok(UserType::Student),
    "faculty" => Ok(UserType::Faculty),
    "staff" => Ok(UserType::Staff),
    "admin" => Ok(UserType::Admin),
    "other" => Ok(UserType::Other),
    other => Err(unknown("user_type", other)),
  }
}

pub fn encode_academic_status(s: AcademicStatus) -> &'static str {
  match s {
    AcademicStatus::Active => "active",
    AcademicStatus::OnLeave => "on_leave",
    AcademicStatus::Graduated => "graduated",
    AcademicStatus::Withdrawn => "withdrawn",
    AcademicStatus::Suspended => "suspended",
  }
}

pub fn decode_academic_status(s: &str) -> Result<AcademicStatus> {
  match s {
    "active" => Ok(AcademicStatus::Active),
    "on_leave" => Ok(AcademicStatus::OnLeave),
    "graduated" => Ok(AcademicStatus::Graduated),
    "withdrawn" => Ok(AcademicStatus::Withdrawn),
    "suspended" => Ok(AcademicStatus::Suspended),
    other => Err(unknown("academic_status", other)),
  }
}

pub fn encode_faculty_position(p: FacultyPosition) -> &'static str {
  match p {
    FacultyPosition::Professor => "professor",
    FacultyPosition::AssocProfessor => "assoc_professor",
    FacultyPosition::AsstProfessor => "asst_professor",
    FacultyPosition::Lecturer => "lecturer",
    FacultyPosition::Instructor => "instructor",
    FacultyPosition::Adjunct => "adjunct",
    FacultyPosition::Other => "other",
  }
}

pub fn decode_faculty_position(s: &str) -> Result<FacultyPosition> {
  match s {
    "professor" => Ok(FacultyPosition::Professor),
    "assoc_professor" => Ok(FacultyPosition::AssocProfessor),
    "asst_professor" => Ok(FacultyPosition::AsstProfessor),
    "lecturer" => Ok(FacultyPosition::Lecturer),
    "instructor" => Ok(FacultyPosition::Instructor),
    "adjunct" => Ok(FacultyPosition::Adjunct),
    "other" => Ok(FacultyPosition::Other),
    other => Err(unknown("position", other)),
  }
}

pub fn decode_admin_level(n: i64) -> Result<AdminLevel> {
  u8::try_from(n)
    .ok()
    .and_then(|n| AdminLevel::try_from(n).ok())
    .ok_or_else(|| unknown("admin_level", &n.to_string()))
}

pub fn decode_engagement_level(n: i64) -> Result<EngagementLevel> {
  u8::try_from(n)
    .ok()
    .and_then(|n| EngagementLevel::try_from(n).ok())
    .ok_or_else(|| unknown("engagement_level", &n.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────
//
// Each `Raw*` struct holds the column values of one row exactly as rusqlite
// returns them; `COLUMNS` lists the select order `from_row` expects.

pub struct RawUser {
  pub user_id:     String,
  pub username:    String,
  pub email:       String,
  pub first_name:  String,
  pub last_name:   String,
  pub date_joined: String,
}

impl RawUser {
  pub const COLUMNS: &'static str =
    "user_id, username, email, first_name, last_name, date_joined";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:     row.get(0)?,
      username:    row.get(1)?,
      email:       row.get(2)?,
      first_name:  row.get(3)?,
      last_name:   row.get(4)?,
      date_joined: row.get(5)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:     decode_uuid(&self.user_id)?,
      username:    self.username,
      email:       self.email,
      first_name:  self.first_name,
      last_name:   self.last_name,
      date_joined: decode_dt(&self.date_joined)?,
    })
  }
}

pub struct RawAddress {
  pub address_id:  String,
  pub street:      String,
  pub city:        String,
  pub region:      String,
  pub postal_code: Option<String>,
  pub country:     String,
}

impl RawAddress {
  pub const COLUMNS: &'static str =
    "address_id, street, city, region, postal_code, country";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      address_id:  row.get(0)?,
      street:      row.get(1)?,
      city:        row.get(2)?,
      region:      row.get(3)?,
      postal_code: row.get(4)?,
      country:     row.get(5)?,
    })
  }

  pub fn into_address(self) -> Result<Address> {
    Ok(Address {
      address_id:  decode_uuid(&self.address_id)?,
      street:      self.street,
      city:        self.city,
      region:      self.region,
      postal_code: self.postal_code,
      country:     self.country,
    })
  }
}

pub struct RawProfile {
  pub profile_id:        String,
  pub user_id:           String,
  pub user_type:         String,
  pub date_of_birth:     Option<String>,
  pub bio:               String,
  pub phone_number:      Option<String>,
  pub emergency_contact: Option<String>,
  pub address_id:        Option<String>,
  pub is_active:         bool,
  pub date_joined:       String,
  pub last_updated:      String,
}

impl RawProfile {
  pub const COLUMNS: &'static str = "profile_id, user_id, user_type, \
     date_of_birth, bio, phone_number, emergency_contact, address_id, \
     is_active, date_joined, last_updated";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      profile_id:        row.get(0)?,
      user_id:           row.get(1)?,
      user_type:         row.get(2)?,
      date_of_birth:     row.get(3)?,
      bio:               row.get(4)?,
      phone_number:      row.get(5)?,
      emergency_contact: row.get(6)?,
      address_id:        row.get(7)?,
      is_active:         row.get(8)?,
      date_joined:       row.get(9)?,
      last_updated:      row.get(10)?,
    })
  }

  pub fn into_profile(self) -> Result<Profile> {
    Ok(Profile {
      profile_id:        decode_uuid(&self.profile_id)?,
      user_id:           decode_uuid(&self.user_id)?,
      user_type:         decode_user_type(&self.user_type)?,
      date_of_birth:     decode_opt_date(self.date_of_birth)?,
      bio:               self.bio,
      phone_number:      self.phone_number,
      emergency_contact: self.emergency_contact,
      address_id:        decode_opt_uuid(self.address_id)?,
      is_active:         self.is_active,
      date_joined:       decode_dt(&self.date_joined)?,
      last_updated:      decode_dt(&self.last_updated)?,
    })
  }
}

pub struct RawStudent {
  pub profile_id:          String,
  pub student_id:          String,
  pub enrollment_date:     String,
  pub expected_graduation: Option<String>,
  pub major:               String,
  pub academic_status:     String,
  pub gpa:                 Option<f64>,
  pub credits_completed:   u32,
}

impl RawStudent {
  pub const COLUMNS: &'static str = "profile_id, student_id, enrollment_date, \
     expected_graduation, major, academic_status, gpa, credits_completed";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      profile_id:          row.get(0)?,
      student_id:          row.get(1)?,
      enrollment_date:     row.get(2)?,
      expected_graduation: row.get(3)?,
      major:               row.get(4)?,
      academic_status:     row.get(5)?,
      gpa:                 row.get(6)?,
      credits_completed:   row.get(7)?,
    })
  }

  pub fn into_student(self) -> Result<Student> {
    Ok(Student {
      profile_id:          decode_uuid(&self.profile_id)?,
      student_id:          self.student_id,
      enrollment_date:     decode_date(&self.enrollment_date)?,
      expected_graduation: decode_opt_date(self.expected_graduation)?,
      major:               self.major,
      academic_status:     decode_academic_status(&self.academic_status)?,
      gpa:                 self.gpa,
      credits_completed:   self.credits_completed,
    })
  }
}

pub struct RawFaculty {
  pub profile_id:         String,
  pub faculty_id:         String,
  pub position:           String,
  pub hire_date:          String,
  pub department:         String,
  pub highest_degree:     String,
  pub alma_mater:         Option<String>,
  pub office_location:    String,
  pub office_hours:       String,
  pub specialization:     String,
  pub research_interests: String,
}

impl RawFaculty {
  pub const COLUMNS: &'static str = "profile_id, faculty_id, position, \
     hire_date, department, highest_degree, alma_mater, office_location, \
     office_hours, specialization, research_interests";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      profile_id:         row.get(0)?,
      faculty_id:         row.get(1)?,
      position:           row.get(2)?,
      hire_date:          row.get(3)?,
      department:         row.get(4)?,
      highest_degree:     row.get(5)?,
      alma_mater:         row.get(6)?,
      office_location:    row.get(7)?,
      office_hours:       row.get(8)?,
      specialization:     row.get(9)?,
      research_interests: row.get(10)?,
    })
  }

  pub fn into_faculty(self) -> Result<FacultyMember> {
    Ok(FacultyMember {
      profile_id:         decode_uuid(&self.profile_id)?,
      faculty_id:         self.faculty_id,
      position:           decode_faculty_position(&self.position)?,
      hire_date:          decode_date(&self.hire_date)?,
      department:         self.department,
      highest_degree:     self.highest_degree,
      alma_mater:         self.alma_mater,
      office_location:    self.office_location,
      office_hours:       self.office_hours,
      specialization:     self.specialization,
      research_interests: self.research_interests,
    })
  }
}

pub struct RawStaff {
  pub profile_id:       String,
  pub staff_id:         String,
  pub department:       String,
  pub position:         String,
  pub hire_date:        String,
  pub responsibilities: String,
  pub supervisor_id:    Option<String>,
  pub admin_level:      i64,
}

impl RawStaff {
  pub const COLUMNS: &'static str = "profile_id, staff_id, department, \
     position, hire_date, responsibilities, supervisor_id, admin_level";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      profile_id:       row.get(0)?,
      staff_id:         row.get(1)?,
      department:       row.get(2)?,
      position:         row.get(3)?,
      hire_date:        row.get(4)?,
      responsibilities: row.get(5)?,
      supervisor_id:    row.get(6)?,
      admin_level:      row.get(7)?,
    })
  }

  pub fn into_staff(self) -> Result<StaffMember> {
    Ok(StaffMember {
      profile_id:       decode_uuid(&self.profile_id)?,
      staff_id:         self.staff_id,
      department:       self.department,
      position:         self.position,
      hire_date:        decode_date(&self.hire_date)?,
      responsibilities: self.responsibilities,
      supervisor_id:    decode_opt_uuid(self.supervisor_id)?,
      admin_level:      decode_admin_level(self.admin_level)?,
    })
  }
}

pub struct RawAlumni {
  pub profile_id:        String,
  pub graduation_year:   i32,
  pub degree:            String,
  pub current_employer:  String,
  pub job_title:         String,
  pub personal_email:    Option<String>,
  pub is_donor:          bool,
  pub last_contact_date: Option<String>,
  pub engagement_level:  i64,
}

impl RawAlumni {
  pub const COLUMNS: &'static str = "profile_id, graduation_year, degree, \
     current_employer, job_title, personal_email, is_donor, \
     last_contact_date, engagement_level";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      profile_id:        row.get(0)?,
      graduation_year:   row.get(1)?,
      degree:            row.get(2)?,
      current_employer:  row.get(3)?,
      job_title:         row.get(4)?,
      personal_email:    row.get(5)?,
      is_donor:          row.get(6)?,
      last_contact_date: row.get(7)?,
      engagement_level:  row.get(8)?,
    })
  }

  pub fn into_alumni(self) -> Result<Alumni> {
    Ok(Alumni {
      profile_id:        decode_uuid(&self.profile_id)?,
      graduation_year:   self.graduation_year,
      degree:            self.degree,
      current_employer:  self.current_employer,
      job_title:         self.job_title,
      personal_email:    self.personal_email,
      is_donor:          self.is_donor,
      last_contact_date: decode_opt_date(self.last_contact_date)?,
      engagement_level:  decode_engagement_level(self.engagement_level)?,
    })
  }
}
