//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use nexgen_core::{
  address::{Address, NewAddress},
  alumni::{Alumni, AlumniInput},
  faculty::{FacultyInput, FacultyMember},
  profile::{Profile, ProfileUpdate},
  role::ProfileView,
  staff::{StaffInput, StaffMember},
  store::{ProfileQuery, RecordStore, StudentQuery},
  student::{Student, StudentInput},
  user::{NewUser, Registration, User},
};

use crate::{Error, Result, records, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A NexGen records store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All calls
/// run one at a time on the connection's worker thread.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `op` on the connection thread, flattening the two error layers.
  async fn run<T, F>(&self, op: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut rusqlite::Connection) -> Result<T> + Send + 'static,
  {
    self.conn.call(move |conn| Ok(op(conn))).await?
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn register_user(&self, input: NewUser) -> Result<Registration> {
    let now = Utc::now();
    self
      .run(move |conn| records::register_user(conn, input, now))
      .await
  }

  async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
    self.run(move |conn| records::get_user(conn, user_id)).await
  }

  async fn delete_user(&self, user_id: Uuid) -> Result<()> {
    self.run(move |conn| records::delete_user(conn, user_id)).await
  }

  // ── Addresses ─────────────────────────────────────────────────────────────

  async fn add_address(&self, input: NewAddress) -> Result<Address> {
    self.run(move |conn| records::add_address(conn, input)).await
  }

  async fn get_address(&self, address_id: Uuid) -> Result<Option<Address>> {
    self
      .run(move |conn| records::get_address(conn, address_id))
      .await
  }

  async fn update_address(
    &self,
    address_id: Uuid,
    input: NewAddress,
  ) -> Result<Address> {
    self
      .run(move |conn| records::update_address(conn, address_id, input))
      .await
  }

  async fn delete_address(&self, address_id: Uuid) -> Result<()> {
    self
      .run(move |conn| records::delete_address(conn, address_id))
      .await
  }

  async fn list_addresses(&self) -> Result<Vec<Address>> {
    self.run(|conn| records::list_addresses(conn)).await
  }

  // ── Profiles ──────────────────────────────────────────────────────────────

  async fn get_profile(&self, profile_id: Uuid) -> Result<Option<Profile>> {
    self
      .run(move |conn| records::get_profile(conn, profile_id))
      .await
  }

  async fn update_profile(
    &self,
    profile_id: Uuid,
    update: ProfileUpdate,
    today: NaiveDate,
  ) -> Result<Profile> {
    let now = Utc::now();
    self
      .run(move |conn| {
        records::update_profile(conn, profile_id, update, today, now)
      })
      .await
  }

  async fn list_profiles(&self, query: ProfileQuery) -> Result<Vec<Profile>> {
    self.run(move |conn| records::list_profiles(conn, query)).await
  }

  async fn materialize_profile(
    &self,
    profile_id: Uuid,
  ) -> Result<Option<ProfileView>> {
    self
      .run(move |conn| records::materialize_profile(conn, profile_id))
      .await
  }

  async fn clear_role(&self, profile_id: Uuid) -> Result<Profile> {
    let now = Utc::now();
    self
      .run(move |conn| records::clear_role(conn, profile_id, now))
      .await
  }

  // ── Role records ──────────────────────────────────────────────────────────

  async fn put_student(
    &self,
    profile_id: Uuid,
    input: StudentInput,
    today: NaiveDate,
  ) -> Result<Student> {
    let now = Utc::now();
    self
      .run(move |conn| records::put_student(conn, profile_id, input, today, now))
      .await
  }

  async fn get_student(&self, profile_id: Uuid) -> Result<Option<Student>> {
    self
      .run(move |conn| records::get_student(conn, profile_id))
      .await
  }

  async fn list_students(&self, query: StudentQuery) -> Result<Vec<Student>> {
    self.run(move |conn| records::list_students(conn, query)).await
  }

  async fn put_faculty(
    &self,
    profile_id: Uuid,
    input: FacultyInput,
    today: NaiveDate,
  ) -> Result<FacultyMember> {
    let now = Utc::now();
    self
      .run(move |conn| records::put_faculty(conn, profile_id, input, today, now))
      .await
  }

  async fn get_faculty(&self, profile_id: Uuid) -> Result<Option<FacultyMember>> {
    self
      .run(move |conn| records::get_faculty(conn, profile_id))
      .await
  }

  async fn list_faculty(
    &self,
    department: Option<String>,
  ) -> Result<Vec<FacultyMember>> {
    self
      .run(move |conn| records::list_faculty(conn, department))
      .await
  }

  async fn put_staff(
    &self,
    profile_id: Uuid,
    input: StaffInput,
    today: NaiveDate,
  ) -> Result<StaffMember> {
    let now = Utc::now();
    self
      .run(move |conn| records::put_staff(conn, profile_id, input, today, now))
      .await
  }

  async fn get_staff(&self, profile_id: Uuid) -> Result<Option<StaffMember>> {
    self.run(move |conn| records::get_staff(conn, profile_id)).await
  }

  async fn list_staff(&self, department: Option<String>) -> Result<Vec<StaffMember>> {
    self
      .run(move |conn| records::list_staff(conn, department))
      .await
  }

  async fn subordinates(&self, profile_id: Uuid) -> Result<Vec<StaffMember>> {
    self
      .run(move |conn| records::subordinates(conn, profile_id))
      .await
  }

  // ── Alumni ────────────────────────────────────────────────────────────────

  async fn put_alumni(
    &self,
    profile_id: Uuid,
    input: AlumniInput,
    today: NaiveDate,
  ) -> Result<Alumni> {
    self
      .run(move |conn| records::put_alumni(conn, profile_id, input, today))
      .await
  }

  async fn get_alumni(&self, profile_id: Uuid) -> Result<Option<Alumni>> {
    self
      .run(move |conn| records::get_alumni(conn, profile_id))
      .await
  }

  async fn list_alumni(&self, graduation_year: Option<i32>) -> Result<Vec<Alumni>> {
    self
      .run(move |conn| records::list_alumni(conn, graduation_year))
      .await
  }
}
