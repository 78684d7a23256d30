//! Synchronous record operations run on the store's connection thread.
//!
//! Every function here executes inside a single `Connection::call`; writes
//! that touch more than one row open an IMMEDIATE transaction so the checks
//! they perform hold until commit.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{
  Connection, ErrorCode, OptionalExtension as _, Transaction,
  TransactionBehavior, params,
};
use uuid::Uuid;

use nexgen_core::{
  address::{Address, NewAddress},
  alumni::{Alumni, AlumniInput},
  faculty::{FacultyInput, FacultyMember},
  hierarchy::{HierarchyError, check_supervisor_chain, check_supervisor_level},
  profile::{Profile, ProfileUpdate},
  role::{ProfileView, RoleKind, RoleRecord, cleared_user_type, reconcile_user_type},
  staff::{StaffInput, StaffMember},
  store::{ProfileQuery, StudentQuery},
  student::{AcademicStatus, Student, StudentInput},
  user::{NewUser, Registration, User},
};

use crate::{
  Error, Result,
  encode::{
    RawAddress, RawAlumni, RawFaculty, RawProfile, RawStaff, RawStudent,
    RawUser, decode_uuid, encode_academic_status, encode_date, encode_dt,
    encode_faculty_position, encode_user_type, encode_uuid,
  },
};

const ROLE_TRIGGER_MESSAGE: &str = "profile already holds a role record";

/// Constraint names as SQLite reports them, with the field and message a
/// caller should see.
const UNIQUE_COLUMNS: &[(&str, &str, &str)] = &[
  ("users.username", "username", "A user with that username already exists."),
  ("users.email", "email", "A user with that email already exists."),
  (
    "students.student_id",
    "student_id",
    "Student with this Student ID already exists.",
  ),
  (
    "faculty_members.faculty_id",
    "faculty_id",
    "Faculty member with this Faculty ID already exists.",
  ),
  (
    "staff_members.staff_id",
    "staff_id",
    "Staff member with this Staff ID already exists.",
  ),
];

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn immediate(conn: &mut Connection) -> Result<Transaction<'_>> {
  Ok(conn.transaction_with_behavior(TransactionBehavior::Immediate)?)
}

/// Turn constraint failures raised by a write into conflicts on the field
/// that caused them. Anything else stays a storage error.
fn classify(err: rusqlite::Error) -> Error {
  if let rusqlite::Error::SqliteFailure(code, Some(message)) = &err
    && code.code == ErrorCode::ConstraintViolation
  {
    if message.contains(ROLE_TRIGGER_MESSAGE) {
      return nexgen_core::Error::conflict(
        "role",
        "Profile already holds a different role record.",
      )
      .into();
    }
    if let Some((_, field, msg)) = UNIQUE_COLUMNS
      .iter()
      .find(|(column, ..)| message.ends_with(column))
    {
      return nexgen_core::Error::conflict(field, *msg).into();
    }
  }
  Error::Sqlite(err)
}

fn select_one<T, R>(
  conn: &Connection,
  sql: &str,
  id: Uuid,
  from_row: fn(&rusqlite::Row<'_>) -> rusqlite::Result<R>,
  decode: fn(R) -> Result<T>,
) -> Result<Option<T>> {
  conn
    .query_row(sql, params![encode_uuid(id)], from_row)
    .optional()?
    .map(decode)
    .transpose()
}

fn select_many<T, R>(
  conn: &Connection,
  sql: &str,
  params: impl rusqlite::Params,
  from_row: fn(&rusqlite::Row<'_>) -> rusqlite::Result<R>,
  decode: fn(R) -> Result<T>,
) -> Result<Vec<T>> {
  let mut stmt = conn.prepare(sql)?;
  let raws = stmt
    .query_map(params, from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(decode).collect()
}

// ─── Users ───────────────────────────────────────────────────────────────────

pub fn register_user(
  conn: &mut Connection,
  input: NewUser,
  now: DateTime<Utc>,
) -> Result<Registration> {
  input.check()?;

  let user = User {
    user_id:     Uuid::new_v4(),
    username:    input.username.trim().to_owned(),
    email:       input.email.trim().to_owned(),
    first_name:  input.first_name,
    last_name:   input.last_name,
    date_joined: now,
  };
  let profile = Profile::new(user.user_id, now);

  let tx = immediate(conn)?;
  tx.execute(
    "INSERT INTO users (user_id, username, email, first_name, last_name, date_joined)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    params![
      encode_uuid(user.user_id),
      user.username,
      user.email,
      user.first_name,
      user.last_name,
      encode_dt(user.date_joined),
    ],
  )
  .map_err(classify)?;
  insert_profile(&tx, &profile)?;
  tx.commit()?;

  Ok(Registration { user, profile })
}

pub fn get_user(conn: &Connection, user_id: Uuid) -> Result<Option<User>> {
  select_one(
    conn,
    &format!("SELECT {} FROM users WHERE user_id = ?1", RawUser::COLUMNS),
    user_id,
    RawUser::from_row,
    RawUser::into_user,
  )
}

pub fn delete_user(conn: &Connection, user_id: Uuid) -> Result<()> {
  let removed = conn.execute(
    "DELETE FROM users WHERE user_id = ?1",
    params![encode_uuid(user_id)],
  )?;
  if removed == 0 {
    return Err(nexgen_core::Error::not_found("user", user_id).into());
  }
  tracing::info!(%user_id, "deleted user and dependent records");
  Ok(())
}

// ─── Addresses ───────────────────────────────────────────────────────────────

pub fn add_address(conn: &Connection, input: NewAddress) -> Result<Address> {
  input.check()?;
  let address = input.into_address(Uuid::new_v4());
  conn.execute(
    "INSERT INTO addresses (address_id, street, city, region, postal_code, country)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    params![
      encode_uuid(address.address_id),
      address.street,
      address.city,
      address.region,
      address.postal_code,
      address.country,
    ],
  )?;
  Ok(address)
}

pub fn get_address(conn: &Connection, address_id: Uuid) -> Result<Option<Address>> {
  select_one(
    conn,
    &format!(
      "SELECT {} FROM addresses WHERE address_id = ?1",
      RawAddress::COLUMNS
    ),
    address_id,
    RawAddress::from_row,
    RawAddress::into_address,
  )
}

pub fn update_address(
  conn: &Connection,
  address_id: Uuid,
  input: NewAddress,
) -> Result<Address> {
  input.check()?;
  let address = input.into_address(address_id);
  let updated = conn.execute(
    "UPDATE addresses
     SET street = ?2, city = ?3, region = ?4, postal_code = ?5, country = ?6
     WHERE address_id = ?1",
    params![
      encode_uuid(address_id),
      address.street,
      address.city,
      address.region,
      address.postal_code,
      address.country,
    ],
  )?;
  if updated == 0 {
    return Err(nexgen_core::Error::not_found("address", address_id).into());
  }
  Ok(address)
}

pub fn delete_address(conn: &Connection, address_id: Uuid) -> Result<()> {
  let removed = conn.execute(
    "DELETE FROM addresses WHERE address_id = ?1",
    params![encode_uuid(address_id)],
  )?;
  if removed == 0 {
    return Err(nexgen_core::Error::not_found("address", address_id).into());
  }
  tracing::info!(%address_id, "deleted address");
  Ok(())
}

pub fn list_addresses(conn: &Connection) -> Result<Vec<Address>> {
  select_many(
    conn,
    &format!(
      "SELECT {} FROM addresses ORDER BY country, region, city, street",
      RawAddress::COLUMNS
    ),
    params![],
    RawAddress::from_row,
    RawAddress::into_address,
  )
}

// ─── Profiles ────────────────────────────────────────────────────────────────

fn insert_profile(conn: &Connection, profile: &Profile) -> Result<()> {
  conn.execute(
    "INSERT INTO profiles (
       profile_id, user_id, user_type, date_of_birth, bio, phone_number,
       emergency_contact, address_id, is_active, date_joined, last_updated
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    params![
      encode_uuid(profile.profile_id),
      encode_uuid(profile.user_id),
      encode_user_type(profile.user_type),
      profile.date_of_birth.map(encode_date),
      profile.bio,
      profile.phone_number,
      profile.emergency_contact,
      profile.address_id.map(encode_uuid),
      profile.is_active,
      encode_dt(profile.date_joined),
      encode_dt(profile.last_updated),
    ],
  )?;
  Ok(())
}

pub fn get_profile(conn: &Connection, profile_id: Uuid) -> Result<Option<Profile>> {
  select_one(
    conn,
    &format!(
      "SELECT {} FROM profiles WHERE profile_id = ?1",
      RawProfile::COLUMNS
    ),
    profile_id,
    RawProfile::from_row,
    RawProfile::into_profile,
  )
}

fn require_profile(conn: &Connection, profile_id: Uuid) -> Result<Profile> {
  get_profile(conn, profile_id)?
    .ok_or_else(|| nexgen_core::Error::not_found("profile", profile_id).into())
}

pub fn update_profile(
  conn: &mut Connection,
  profile_id: Uuid,
  update: ProfileUpdate,
  today: NaiveDate,
  now: DateTime<Utc>,
) -> Result<Profile> {
  update.check(today)?;

  let tx = immediate(conn)?;
  let mut profile = require_profile(&tx, profile_id)?;

  if let Some(address_id) = update.address_id
    && get_address(&tx, address_id)?.is_none()
  {
    return Err(
      nexgen_core::Error::invalid("address_id", "Select a valid address.").into(),
    );
  }

  let role = load_role(&tx, profile_id)?;
  if !role.permits(update.user_type)
    && let Some(kind) = role.kind()
  {
    return Err(
      nexgen_core::Error::conflict(
        "user_type",
        format!(
          "Profile holds a {} record, so its user type must stay \"{}\".",
          kind.as_str(),
          kind.user_type().label(),
        ),
      )
      .into(),
    );
  }

  update.apply(&mut profile, now);
  tx.execute(
    "UPDATE profiles
     SET user_type = ?2, date_of_birth = ?3, bio = ?4, phone_number = ?5,
         emergency_contact = ?6, address_id = ?7, is_active = ?8,
         last_updated = ?9
     WHERE profile_id = ?1",
    params![
      encode_uuid(profile_id),
      encode_user_type(profile.user_type),
      profile.date_of_birth.map(encode_date),
      profile.bio,
      profile.phone_number,
      profile.emergency_contact,
      profile.address_id.map(encode_uuid),
      profile.is_active,
      encode_dt(profile.last_updated),
    ],
  )?;
  tx.commit()?;

  Ok(profile)
}

pub fn list_profiles(conn: &Connection, query: ProfileQuery) -> Result<Vec<Profile>> {
  select_many(
    conn,
    &format!(
      "SELECT {} FROM profiles
       WHERE (?1 IS NULL OR user_type = ?1)
         AND (?2 IS NULL OR is_active = ?2)
       ORDER BY (SELECT username FROM users WHERE users.user_id = profiles.user_id)",
      RawProfile::COLUMNS
    ),
    params![query.user_type.map(encode_user_type), query.active],
    RawProfile::from_row,
    RawProfile::into_profile,
  )
}

pub fn materialize_profile(
  conn: &Connection,
  profile_id: Uuid,
) -> Result<Option<ProfileView>> {
  let Some(profile) = get_profile(conn, profile_id)? else {
    return Ok(None);
  };
  let user = get_user(conn, profile.user_id)?
    .ok_or_else(|| nexgen_core::Error::not_found("user", profile.user_id))?;
  let address = match profile.address_id {
    Some(address_id) => get_address(conn, address_id)?,
    None => None,
  };
  let role = load_role(conn, profile_id)?;

  Ok(Some(ProfileView { user, profile, address, role }))
}

// ─── Role synchronisation ────────────────────────────────────────────────────

fn role_kind(conn: &Connection, profile_id: Uuid) -> Result<Option<RoleKind>> {
  let kind: Option<String> = conn
    .query_row(
      "SELECT 'student' FROM students WHERE profile_id = ?1
       UNION ALL SELECT 'faculty' FROM faculty_members WHERE profile_id = ?1
       UNION ALL SELECT 'staff' FROM staff_members WHERE profile_id = ?1",
      params![encode_uuid(profile_id)],
      |r| r.get(0),
    )
    .optional()?;

  Ok(match kind.as_deref() {
    Some("student") => Some(RoleKind::Student),
    Some("faculty") => Some(RoleKind::Faculty),
    Some("staff") => Some(RoleKind::Staff),
    _ => None,
  })
}

fn load_role(conn: &Connection, profile_id: Uuid) -> Result<RoleRecord> {
  let record = match role_kind(conn, profile_id)? {
    None => RoleRecord::None,
    Some(RoleKind::Student) => get_student(conn, profile_id)?
      .map(RoleRecord::Student)
      .unwrap_or_default(),
    Some(RoleKind::Faculty) => get_faculty(conn, profile_id)?
      .map(RoleRecord::Faculty)
      .unwrap_or_default(),
    Some(RoleKind::Staff) => get_staff(conn, profile_id)?
      .map(RoleRecord::Staff)
      .unwrap_or_default(),
  };
  Ok(record)
}

/// Fail unless the profile holds no role record or one of `kind`.
fn ensure_role_slot(conn: &Connection, profile_id: Uuid, kind: RoleKind) -> Result<()> {
  match role_kind(conn, profile_id)? {
    Some(held) if held != kind => Err(
      nexgen_core::Error::conflict(
        "role",
        format!(
          "Profile already holds a {} record; clear it before adding a {} record.",
          held.as_str(),
          kind.as_str(),
        ),
      )
      .into(),
    ),
    _ => Ok(()),
  }
}

/// Bring the profile's tag in line with a freshly written role record. The
/// profile row is left untouched when the tag already matches.
fn sync_user_type(
  conn: &Connection,
  profile: &Profile,
  kind: RoleKind,
  now: DateTime<Utc>,
) -> Result<()> {
  let Some(tag) = reconcile_user_type(profile.user_type, kind) else {
    return Ok(());
  };
  conn.execute(
    "UPDATE profiles SET user_type = ?2, last_updated = ?3 WHERE profile_id = ?1",
    params![encode_uuid(profile.profile_id), encode_user_type(tag), encode_dt(now)],
  )?;
  tracing::info!(
    profile_id = %profile.profile_id,
    from = encode_user_type(profile.user_type),
    to = encode_user_type(tag),
    "synchronised profile user type with role record"
  );
  Ok(())
}

pub fn clear_role(
  conn: &mut Connection,
  profile_id: Uuid,
  now: DateTime<Utc>,
) -> Result<Profile> {
  let tx = immediate(conn)?;
  let mut profile = require_profile(&tx, profile_id)?;

  let table = match role_kind(&tx, profile_id)? {
    Some(RoleKind::Student) => Some("students"),
    Some(RoleKind::Faculty) => Some("faculty_members"),
    Some(RoleKind::Staff) => Some("staff_members"),
    None => None,
  };
  if let Some(table) = table {
    tx.execute(
      &format!("DELETE FROM {table} WHERE profile_id = ?1"),
      params![encode_uuid(profile_id)],
    )?;
    tracing::info!(%profile_id, table, "cleared role record");
  }

  let tag = cleared_user_type(profile.user_type);
  if tag != profile.user_type {
    tx.execute(
      "UPDATE profiles SET user_type = ?2, last_updated = ?3 WHERE profile_id = ?1",
      params![encode_uuid(profile_id), encode_user_type(tag), encode_dt(now)],
    )?;
    profile.user_type = tag;
    profile.last_updated = now;
  }
  tx.commit()?;

  Ok(profile)
}

// ─── Students ────────────────────────────────────────────────────────────────

pub fn put_student(
  conn: &mut Connection,
  profile_id: Uuid,
  input: StudentInput,
  today: NaiveDate,
  now: DateTime<Utc>,
) -> Result<Student> {
  input.check(today)?;
  let student = input.into_student(profile_id);

  let tx = immediate(conn)?;
  let profile = require_profile(&tx, profile_id)?;
  ensure_role_slot(&tx, profile_id, RoleKind::Student)?;

  tx.execute(
    "INSERT INTO students (
       profile_id, student_id, enrollment_date, expected_graduation, major,
       academic_status, gpa, credits_completed
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
     ON CONFLICT(profile_id) DO UPDATE SET
       student_id          = excluded.student_id,
       enrollment_date     = excluded.enrollment_date,
       expected_graduation = excluded.expected_graduation,
       major               = excluded.major,
       academic_status     = excluded.academic_status,
       gpa                 = excluded.gpa,
       credits_completed   = excluded.credits_completed",
    params![
      encode_uuid(profile_id),
      student.student_id,
      encode_date(student.enrollment_date),
      student.expected_graduation.map(encode_date),
      student.major,
      encode_academic_status(student.academic_status),
      student.gpa,
      student.credits_completed,
    ],
  )
  .map_err(classify)?;

  sync_user_type(&tx, &profile, RoleKind::Student, now)?;
  tx.commit()?;

  Ok(student)
}

pub fn get_student(conn: &Connection, profile_id: Uuid) -> Result<Option<Student>> {
  select_one(
    conn,
    &format!(
      "SELECT {} FROM students WHERE profile_id = ?1",
      RawStudent::COLUMNS
    ),
    profile_id,
    RawStudent::from_row,
    RawStudent::into_student,
  )
}

pub fn list_students(conn: &Connection, query: StudentQuery) -> Result<Vec<Student>> {
  select_many(
    conn,
    &format!(
      "SELECT {} FROM students
       WHERE (?1 IS NULL OR academic_status = ?1)
         AND (?2 IS NULL OR major = ?2)
       ORDER BY student_id",
      RawStudent::COLUMNS
    ),
    params![query.status.map(encode_academic_status), query.major],
    RawStudent::from_row,
    RawStudent::into_student,
  )
}

// ─── Faculty ─────────────────────────────────────────────────────────────────

pub fn put_faculty(
  conn: &mut Connection,
  profile_id: Uuid,
  input: FacultyInput,
  today: NaiveDate,
  now: DateTime<Utc>,
) -> Result<FacultyMember> {
  input.check(today)?;
  let faculty = input.into_faculty(profile_id);

  let tx = immediate(conn)?;
  let profile = require_profile(&tx, profile_id)?;
  ensure_role_slot(&tx, profile_id, RoleKind::Faculty)?;

  tx.execute(
    "INSERT INTO faculty_members (
       profile_id, faculty_id, position, hire_date, department,
       highest_degree, alma_mater, office_location, office_hours,
       specialization, research_interests
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
     ON CONFLICT(profile_id) DO UPDATE SET
       faculty_id         = excluded.faculty_id,
       position           = excluded.position,
       hire_date          = excluded.hire_date,
       department         = excluded.department,
       highest_degree     = excluded.highest_degree,
       alma_mater         = excluded.alma_mater,
       office_location    = excluded.office_location,
       office_hours       = excluded.office_hours,
       specialization     = excluded.specialization,
       research_interests = excluded.research_interests",
    params![
      encode_uuid(profile_id),
      faculty.faculty_id,
      encode_faculty_position(faculty.position),
      encode_date(faculty.hire_date),
      faculty.department,
      faculty.highest_degree,
      faculty.alma_mater,
      faculty.office_location,
      faculty.office_hours,
      faculty.specialization,
      faculty.research_interests,
    ],
  )
  .map_err(classify)?;

  sync_user_type(&tx, &profile, RoleKind::Faculty, now)?;
  tx.commit()?;

  Ok(faculty)
}

pub fn get_faculty(
  conn: &Connection,
  profile_id: Uuid,
) -> Result<Option<FacultyMember>> {
  select_one(
    conn,
    &format!(
      "SELECT {} FROM faculty_members WHERE profile_id = ?1",
      RawFaculty::COLUMNS
    ),
    profile_id,
    RawFaculty::from_row,
    RawFaculty::into_faculty,
  )
}

pub fn list_faculty(
  conn: &Connection,
  department: Option<String>,
) -> Result<Vec<FacultyMember>> {
  select_many(
    conn,
    &format!(
      "SELECT {} FROM faculty_members
       WHERE (?1 IS NULL OR department = ?1)
       ORDER BY faculty_id",
      RawFaculty::COLUMNS
    ),
    params![department],
    RawFaculty::from_row,
    RawFaculty::into_faculty,
  )
}

// ─── Staff ───────────────────────────────────────────────────────────────────

fn supervisor_of(conn: &Connection, staff: Uuid) -> Result<Option<Uuid>> {
  let sup: Option<Option<String>> = conn
    .query_row(
      "SELECT supervisor_id FROM staff_members WHERE profile_id = ?1",
      params![encode_uuid(staff)],
      |r| r.get(0),
    )
    .optional()?;
  sup.flatten().as_deref().map(decode_uuid).transpose()
}

/// Every chain failure is reported against `supervisor`; only lookup errors
/// pass through as store errors.
pub(crate) fn hierarchy_failure(e: HierarchyError<Error>) -> Error {
  match e {
    HierarchyError::Lookup(e) => e,
    other => nexgen_core::Error::invalid("supervisor", other.to_string()).into(),
  }
}

/// Check a staff record's supervisor link and admin level against the tree
/// as currently stored.
fn check_staff_links(conn: &Connection, staff: &StaffMember) -> Result<()> {
  let others: i64 = conn.query_row(
    "SELECT COUNT(*) FROM staff_members WHERE profile_id != ?1",
    params![encode_uuid(staff.profile_id)],
    |r| r.get(0),
  )?;
  let limit = usize::try_from(others).unwrap_or(0) + 1;

  check_supervisor_chain(staff.profile_id, staff.supervisor_id, limit, |id| {
    supervisor_of(conn, id)
  })
  .map_err(hierarchy_failure)?;

  if let Some(supervisor_id) = staff.supervisor_id {
    let supervisor = get_staff(conn, supervisor_id)?.ok_or_else(|| {
      nexgen_core::Error::invalid("supervisor", "Select a valid supervisor.")
    })?;
    check_supervisor_level(staff.admin_level, supervisor.admin_level)
      .map_err(|msg| nexgen_core::Error::invalid("supervisor", msg))?;
  }

  let highest_subordinate: Option<i64> = conn.query_row(
    "SELECT MAX(admin_level) FROM staff_members WHERE supervisor_id = ?1",
    params![encode_uuid(staff.profile_id)],
    |r| r.get(0),
  )?;
  let own_level = i64::from(u8::from(staff.admin_level));
  if highest_subordinate.is_some_and(|level| level > own_level) {
    return Err(
      nexgen_core::Error::invalid(
        "admin_level",
        "Admin level cannot be lower than that of a direct subordinate.",
      )
      .into(),
    );
  }

  Ok(())
}

pub fn put_staff(
  conn: &mut Connection,
  profile_id: Uuid,
  input: StaffInput,
  today: NaiveDate,
  now: DateTime<Utc>,
) -> Result<StaffMember> {
  input.check(today)?;
  let staff = input.into_staff(profile_id);

  let tx = immediate(conn)?;
  let profile = require_profile(&tx, profile_id)?;
  ensure_role_slot(&tx, profile_id, RoleKind::Staff)?;
  check_staff_links(&tx, &staff)?;

  tx.execute(
    "INSERT INTO staff_members (
       profile_id, staff_id, department, position, hire_date,
       responsibilities, supervisor_id, admin_level
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
     ON CONFLICT(profile_id) DO UPDATE SET
       staff_id         = excluded.staff_id,
       department       = excluded.department,
       position         = excluded.position,
       hire_date        = excluded.hire_date,
       responsibilities = excluded.responsibilities,
       supervisor_id    = excluded.supervisor_id,
       admin_level      = excluded.admin_level",
    params![
      encode_uuid(profile_id),
      staff.staff_id,
      staff.department,
      staff.position,
      encode_date(staff.hire_date),
      staff.responsibilities,
      staff.supervisor_id.map(encode_uuid),
      u8::from(staff.admin_level),
    ],
  )
  .map_err(classify)?;

  sync_user_type(&tx, &profile, RoleKind::Staff, now)?;
  tx.commit()?;

  Ok(staff)
}

pub fn get_staff(conn: &Connection, profile_id: Uuid) -> Result<Option<StaffMember>> {
  select_one(
    conn,
    &format!(
      "SELECT {} FROM staff_members WHERE profile_id = ?1",
      RawStaff::COLUMNS
    ),
    profile_id,
    RawStaff::from_row,
    RawStaff::into_staff,
  )
}

pub fn list_staff(
  conn: &Connection,
  department: Option<String>,
) -> Result<Vec<StaffMember>> {
  select_many(
    conn,
    &format!(
      "SELECT {} FROM staff_members
       WHERE (?1 IS NULL OR department = ?1)
       ORDER BY department, position",
      RawStaff::COLUMNS
    ),
    params![department],
    RawStaff::from_row,
    RawStaff::into_staff,
  )
}

pub fn subordinates(conn: &Connection, profile_id: Uuid) -> Result<Vec<StaffMember>> {
  select_many(
    conn,
    &format!(
      "SELECT {} FROM staff_members WHERE supervisor_id = ?1 ORDER BY staff_id",
      RawStaff::COLUMNS
    ),
    params![encode_uuid(profile_id)],
    RawStaff::from_row,
    RawStaff::into_staff,
  )
}

// ─── Alumni ──────────────────────────────────────────────────────────────────

pub fn put_alumni(
  conn: &mut Connection,
  profile_id: Uuid,
  input: AlumniInput,
  today: NaiveDate,
) -> Result<Alumni> {
  let tx = immediate(conn)?;

  let student = get_student(&tx, profile_id)?
    .ok_or_else(|| nexgen_core::Error::not_found("student", profile_id))?;
  let user: User = tx
    .query_row(
      &format!(
        "SELECT {} FROM users
         WHERE user_id = (SELECT user_id FROM profiles WHERE profile_id = ?1)",
        RawUser::COLUMNS
      ),
      params![encode_uuid(profile_id)],
      RawUser::from_row,
    )?
    .into_user()?;

  input.check(student.enrollment_date, &user.email, today)?;
  let alumni = input.into_alumni(profile_id);

  tx.execute(
    "INSERT INTO alumni (
       profile_id, graduation_year, degree, current_employer, job_title,
       personal_email, is_donor, last_contact_date, engagement_level
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
     ON CONFLICT(profile_id) DO UPDATE SET
       graduation_year   = excluded.graduation_year,
       degree            = excluded.degree,
       current_employer  = excluded.current_employer,
       job_title         = excluded.job_title,
       personal_email    = excluded.personal_email,
       is_donor          = excluded.is_donor,
       last_contact_date = excluded.last_contact_date,
       engagement_level  = excluded.engagement_level",
    params![
      encode_uuid(profile_id),
      alumni.graduation_year,
      alumni.degree,
      alumni.current_employer,
      alumni.job_title,
      alumni.personal_email,
      alumni.is_donor,
      alumni.last_contact_date.map(encode_date),
      u8::from(alumni.engagement_level),
    ],
  )?;

  if student.academic_status != AcademicStatus::Graduated {
    tx.execute(
      "UPDATE students SET academic_status = ?2 WHERE profile_id = ?1",
      params![
        encode_uuid(profile_id),
        encode_academic_status(AcademicStatus::Graduated),
      ],
    )?;
    tracing::info!(
      %profile_id,
      student_id = %student.student_id,
      "marked student graduated"
    );
  }
  tx.commit()?;

  Ok(alumni)
}

pub fn get_alumni(conn: &Connection, profile_id: Uuid) -> Result<Option<Alumni>> {
  select_one(
    conn,
    &format!("SELECT {} FROM alumni WHERE profile_id = ?1", RawAlumni::COLUMNS),
    profile_id,
    RawAlumni::from_row,
    RawAlumni::into_alumni,
  )
}

pub fn list_alumni(
  conn: &Connection,
  graduation_year: Option<i32>,
) -> Result<Vec<Alumni>> {
  select_many(
    conn,
    &format!(
      "SELECT {} FROM alumni
       WHERE (?1 IS NULL OR graduation_year = ?1)
       ORDER BY graduation_year, (
         SELECT u.username FROM profiles p
         JOIN users u ON u.user_id = p.user_id
         WHERE p.profile_id = alumni.profile_id
       )",
      RawAlumni::COLUMNS
    ),
    params![graduation_year],
    RawAlumni::from_row,
    RawAlumni::into_alumni,
  )
}

#[cfg(test)]
mod tests {
  use super::*;

  fn supervisor_message(err: Error) -> String {
    match err {
      Error::Core(nexgen_core::Error::Validation(fields)) => {
        fields.get("supervisor")[0].clone()
      }
      other => panic!("expected a supervisor validation failure, got {other:?}"),
    }
  }

  #[test]
  fn chain_failures_are_supervisor_validation_errors() {
    assert!(
      supervisor_message(hierarchy_failure(HierarchyError::Cycle))
        .contains("Circular")
    );
    assert!(
      supervisor_message(hierarchy_failure(HierarchyError::Unterminated {
        limit: 3,
      }))
      .contains("within 3 steps")
    );
  }

  #[test]
  fn lookup_failures_pass_through() {
    let err = hierarchy_failure(HierarchyError::Lookup(Error::DateParse(
      "bad".into(),
    )));
    assert!(matches!(err, Error::DateParse(_)));
  }
}
