//! The `RecordStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `nexgen-store-sqlite`).
//! Higher layers (`nexgen-api`, `nexgen-server`) depend on this abstraction,
//! not on any concrete backend.
//!
//! Every write that validates dates takes `today` explicitly; backends never
//! consult the wall clock for validation, only for audit timestamps.

use std::future::Future;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
  DomainFailure,
  address::{Address, NewAddress},
  alumni::{Alumni, AlumniInput},
  faculty::{FacultyInput, FacultyMember},
  profile::{Profile, ProfileUpdate, UserType},
  role::ProfileView,
  staff::{StaffInput, StaffMember},
  student::{AcademicStatus, Student, StudentInput},
  user::{NewUser, Registration, User},
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Filters for [`RecordStore::list_profiles`]. Results are ordered by
/// username.
#[derive(Debug, Clone, Default)]
pub struct ProfileQuery {
  pub user_type: Option<UserType>,
  pub active:    Option<bool>,
}

/// Filters for [`RecordStore::list_students`]. Results are ordered by
/// student id.
#[derive(Debug, Clone, Default)]
pub struct StudentQuery {
  pub status: Option<AcademicStatus>,
  pub major:  Option<String>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a records store backend.
///
/// Writes that touch more than one row (a role record and its profile tag,
/// a staff link and the supervision tree, an alumni record and its student)
/// are atomic: either every row is written or none is.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + DomainFailure + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  /// Create a user identity together with its (default) profile.
  fn register_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<Registration, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// Delete a user; their profile and any role records go with them.
  fn delete_user(
    &self,
    user_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Addresses ─────────────────────────────────────────────────────────

  fn add_address(
    &self,
    input: NewAddress,
  ) -> impl Future<Output = Result<Address, Self::Error>> + Send + '_;

  fn get_address(
    &self,
    address_id: Uuid,
  ) -> impl Future<Output = Result<Option<Address>, Self::Error>> + Send + '_;

  fn update_address(
    &self,
    address_id: Uuid,
    input: NewAddress,
  ) -> impl Future<Output = Result<Address, Self::Error>> + Send + '_;

  /// Delete an address. Profiles that referenced it are detached.
  fn delete_address(
    &self,
    address_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// All addresses ordered by country, region, city, street.
  fn list_addresses(
    &self,
  ) -> impl Future<Output = Result<Vec<Address>, Self::Error>> + Send + '_;

  // ── Profiles ──────────────────────────────────────────────────────────

  fn get_profile(
    &self,
    profile_id: Uuid,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + '_;

  /// Replace the editable profile fields. The role tag may not contradict
  /// an attached role record.
  fn update_profile(
    &self,
    profile_id: Uuid,
    update: ProfileUpdate,
    today: NaiveDate,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;

  fn list_profiles(
    &self,
    query: ProfileQuery,
  ) -> impl Future<Output = Result<Vec<Profile>, Self::Error>> + Send + '_;

  /// Assemble the [`ProfileView`] for a profile. Returns `None` if the
  /// profile does not exist.
  fn materialize_profile(
    &self,
    profile_id: Uuid,
  ) -> impl Future<Output = Result<Option<ProfileView>, Self::Error>> + Send + '_;

  /// Remove whatever role record the profile holds and reset a role tag to
  /// `other`. Alumni records go with a removed student record; subordinates
  /// of a removed staff member lose their supervisor.
  fn clear_role(
    &self,
    profile_id: Uuid,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;

  // ── Role records ──────────────────────────────────────────────────────

  /// Create or replace the student record for a profile, tagging the
  /// profile `student` if it is not already.
  fn put_student(
    &self,
    profile_id: Uuid,
    input: StudentInput,
    today: NaiveDate,
  ) -> impl Future<Output = Result<Student, Self::Error>> + Send + '_;

  fn get_student(
    &self,
    profile_id: Uuid,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + '_;

  fn list_students(
    &self,
    query: StudentQuery,
  ) -> impl Future<Output = Result<Vec<Student>, Self::Error>> + Send + '_;

  fn put_faculty(
    &self,
    profile_id: Uuid,
    input: FacultyInput,
    today: NaiveDate,
  ) -> impl Future<Output = Result<FacultyMember, Self::Error>> + Send + '_;

  fn get_faculty(
    &self,
    profile_id: Uuid,
  ) -> impl Future<Output = Result<Option<FacultyMember>, Self::Error>> + Send + '_;

  /// Faculty ordered by faculty id, optionally limited to one department.
  fn list_faculty(
    &self,
    department: Option<String>,
  ) -> impl Future<Output = Result<Vec<FacultyMember>, Self::Error>> + Send + '_;

  /// Create or replace the staff record for a profile. The supervisor link
  /// is checked against the stored tree (no self-supervision, no cycles,
  /// supervisor admin level at least the subordinate's) before writing.
  fn put_staff(
    &self,
    profile_id: Uuid,
    input: StaffInput,
    today: NaiveDate,
  ) -> impl Future<Output = Result<StaffMember, Self::Error>> + Send + '_;

  fn get_staff(
    &self,
    profile_id: Uuid,
  ) -> impl Future<Output = Result<Option<StaffMember>, Self::Error>> + Send + '_;

  /// Staff ordered by department then position.
  fn list_staff(
    &self,
    department: Option<String>,
  ) -> impl Future<Output = Result<Vec<StaffMember>, Self::Error>> + Send + '_;

  /// Staff members reporting directly to `profile_id`.
  fn subordinates(
    &self,
    profile_id: Uuid,
  ) -> impl Future<Output = Result<Vec<StaffMember>, Self::Error>> + Send + '_;

  // ── Alumni ────────────────────────────────────────────────────────────

  /// Create or replace the alumni record for a student, marking the student
  /// `graduated`.
  fn put_alumni(
    &self,
    profile_id: Uuid,
    input: AlumniInput,
    today: NaiveDate,
  ) -> impl Future<Output = Result<Alumni, Self::Error>> + Send + '_;

  fn get_alumni(
    &self,
    profile_id: Uuid,
  ) -> impl Future<Output = Result<Option<Alumni>, Self::Error>> + Send + '_;

  /// Alumni ordered by graduation year (earliest first), then username;
  /// optionally for one year only.
  fn list_alumni(
    &self,
    graduation_year: Option<i32>,
  ) -> impl Future<Output = Result<Vec<Alumni>, Self::Error>> + Send + '_;
}
