//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use nexgen_core::{
  FieldErrors,
  address::NewAddress,
  alumni::{AlumniInput, EngagementLevel},
  faculty::{FacultyInput, FacultyPosition},
  profile::{Profile, ProfileUpdate, UserType},
  role::RoleRecord,
  staff::{AdminLevel, StaffInput},
  store::{ProfileQuery, RecordStore, StudentQuery},
  student::{AcademicStatus, StudentInput},
  user::NewUser,
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn today() -> NaiveDate { d(2024, 7, 1) }

async fn register(s: &SqliteStore, username: &str) -> Profile {
  s.register_user(NewUser {
    username:   username.into(),
    email:      format!("{username}@nexgen.uz"),
    first_name: String::new(),
    last_name:  String::new(),
  })
  .await
  .unwrap()
  .profile
}

fn conflict_fields(err: Error) -> FieldErrors {
  match err {
    Error::Core(nexgen_core::Error::Conflict(fields)) => fields,
    other => panic!("expected conflict, got {other:?}"),
  }
}

fn invalid_fields(err: Error) -> FieldErrors {
  match err {
    Error::Core(nexgen_core::Error::Validation(fields)) => fields,
    other => panic!("expected validation failure, got {other:?}"),
  }
}

fn student(id: &str) -> StudentInput {
  StudentInput {
    student_id:          id.into(),
    enrollment_date:     d(2020, 9, 1),
    expected_graduation: Some(d(2024, 6, 1)),
    major:               "Computer Science".into(),
    academic_status:     AcademicStatus::Active,
    gpa:                 Some(3.5),
    credits_completed:   90,
  }
}

fn faculty(id: &str) -> FacultyInput {
  FacultyInput {
    faculty_id:         id.into(),
    position:           FacultyPosition::Lecturer,
    hire_date:          d(2015, 9, 1),
    department:         "Mathematics".into(),
    highest_degree:     "PhD".into(),
    alma_mater:         None,
    office_location:    String::new(),
    office_hours:       String::new(),
    specialization:     String::new(),
    research_interests: String::new(),
  }
}

fn staff(id: &str, supervisor: Option<Uuid>, level: AdminLevel) -> StaffInput {
  StaffInput {
    staff_id:         id.into(),
    department:       "Registrar".into(),
    position:         "Officer".into(),
    hire_date:        d(2018, 1, 15),
    responsibilities: String::new(),
    supervisor_id:    supervisor,
    admin_level:      level,
  }
}

fn alumni(year: i32) -> AlumniInput {
  AlumniInput {
    graduation_year:   year,
    degree:            "B.Sc.".into(),
    current_employer:  String::new(),
    job_title:         String::new(),
    personal_email:    None,
    is_donor:          false,
    last_contact_date: None,
    engagement_level:  EngagementLevel::Medium,
  }
}

fn profile_update(user_type: UserType) -> ProfileUpdate {
  ProfileUpdate {
    user_type,
    date_of_birth: Some(d(2000, 3, 14)),
    bio: "Hello".into(),
    phone_number: Some("+998901234567".into()),
    emergency_contact: None,
    address_id: None,
    is_active: true,
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn registration_creates_default_profile() {
  let s = store().await;
  let reg = s
    .register_user(NewUser {
      username:   "dilnoza".into(),
      email:      "dilnoza@nexgen.uz".into(),
      first_name: "Dilnoza".into(),
      last_name:  "Karimova".into(),
    })
    .await
    .unwrap();

  assert_eq!(reg.profile.user_id, reg.user.user_id);
  assert_eq!(reg.profile.user_type, UserType::Other);
  assert!(reg.profile.is_active);

  let user = s.get_user(reg.user.user_id).await.unwrap().unwrap();
  assert_eq!(user.display_name(), "Dilnoza Karimova");
  let profile = s.get_profile(reg.profile.profile_id).await.unwrap().unwrap();
  assert_eq!(profile, reg.profile);
}

#[tokio::test]
async fn duplicate_username_and_email_conflict() {
  let s = store().await;
  register(&s, "aziz").await;

  let err = s
    .register_user(NewUser {
      username:   "aziz".into(),
      email:      "other@nexgen.uz".into(),
      first_name: String::new(),
      last_name:  String::new(),
    })
    .await
    .unwrap_err();
  assert!(conflict_fields(err).contains("username"));

  let err = s
    .register_user(NewUser {
      username:   "aziz2".into(),
      email:      "AZIZ@nexgen.uz".into(),
      first_name: String::new(),
      last_name:  String::new(),
    })
    .await
    .unwrap_err();
  assert!(conflict_fields(err).contains("email"));

  assert_eq!(s.list_profiles(ProfileQuery::default()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn deleting_a_user_removes_profile_and_role() {
  let s = store().await;
  let profile = register(&s, "kamola").await;
  s.put_student(profile.profile_id, student("S1"), today()).await.unwrap();

  s.delete_user(profile.user_id).await.unwrap();

  assert!(s.get_profile(profile.profile_id).await.unwrap().is_none());
  assert!(s.get_student(profile.profile_id).await.unwrap().is_none());

  let err = s.delete_user(profile.user_id).await.unwrap_err();
  assert!(matches!(err, Error::Core(nexgen_core::Error::NotFound { .. })));
}

// ─── Addresses & profiles ────────────────────────────────────────────────────

fn tashkent() -> NewAddress {
  NewAddress {
    street:      "Amir Temur 108".into(),
    city:        "Tashkent".into(),
    region:      "Tashkent".into(),
    postal_code: Some("100084".into()),
    country:     "Uzbekistan".into(),
  }
}

#[tokio::test]
async fn deleting_an_address_detaches_profiles() {
  let s = store().await;
  let profile = register(&s, "bekzod").await;
  let address = s.add_address(tashkent()).await.unwrap();

  let mut update = profile_update(UserType::Other);
  update.address_id = Some(address.address_id);
  let updated = s
    .update_profile(profile.profile_id, update, today())
    .await
    .unwrap();
  assert_eq!(updated.address_id, Some(address.address_id));

  s.delete_address(address.address_id).await.unwrap();
  let profile = s.get_profile(profile.profile_id).await.unwrap().unwrap();
  assert_eq!(profile.address_id, None);
}

#[tokio::test]
async fn address_update_and_validation() {
  let s = store().await;
  let address = s.add_address(tashkent()).await.unwrap();

  let mut changed = tashkent();
  changed.city = "Samarkand".into();
  s.update_address(address.address_id, changed).await.unwrap();
  let stored = s.get_address(address.address_id).await.unwrap().unwrap();
  assert_eq!(stored.city, "Samarkand");

  let mut bad = tashkent();
  bad.postal_code = Some("1000".into());
  let err = s.add_address(bad).await.unwrap_err();
  assert!(invalid_fields(err).contains("postal_code"));

  let err = s.update_address(Uuid::new_v4(), tashkent()).await.unwrap_err();
  assert!(matches!(err, Error::Core(nexgen_core::Error::NotFound { .. })));
}

#[tokio::test]
async fn profile_update_rejects_unknown_address() {
  let s = store().await;
  let profile = register(&s, "nodira").await;

  let mut update = profile_update(UserType::Other);
  update.address_id = Some(Uuid::new_v4());
  let err = s
    .update_profile(profile.profile_id, update, today())
    .await
    .unwrap_err();
  assert!(invalid_fields(err).contains("address_id"));
}

#[tokio::test]
async fn profile_tag_cannot_contradict_role_record() {
  let s = store().await;
  let profile = register(&s, "sardor").await;
  s.put_student(profile.profile_id, student("S1"), today()).await.unwrap();

  let err = s
    .update_profile(profile.profile_id, profile_update(UserType::Faculty), today())
    .await
    .unwrap_err();
  assert!(conflict_fields(err).contains("user_type"));

  let ok = s
    .update_profile(profile.profile_id, profile_update(UserType::Student), today())
    .await
    .unwrap();
  assert_eq!(ok.bio, "Hello");
}

#[tokio::test]
async fn list_profiles_filters_and_orders_by_username() {
  let s = store().await;
  let zafar = register(&s, "zafar").await;
  let anvar = register(&s, "anvar").await;
  let malika = register(&s, "malika").await;
  s.put_student(zafar.profile_id, student("S1"), today()).await.unwrap();
  s.put_student(anvar.profile_id, student("S2"), today()).await.unwrap();

  let mut inactive = profile_update(UserType::Other);
  inactive.is_active = false;
  s.update_profile(malika.profile_id, inactive, today()).await.unwrap();

  let students = s
    .list_profiles(ProfileQuery { user_type: Some(UserType::Student), active: None })
    .await
    .unwrap();
  let ids: Vec<_> = students.iter().map(|p| p.profile_id).collect();
  assert_eq!(ids, vec![anvar.profile_id, zafar.profile_id]);

  let inactive = s
    .list_profiles(ProfileQuery { user_type: None, active: Some(false) })
    .await
    .unwrap();
  assert_eq!(inactive.len(), 1);
  assert_eq!(inactive[0].profile_id, malika.profile_id);
}

#[tokio::test]
async fn materialized_view_carries_role_and_address() {
  let s = store().await;
  let profile = register(&s, "ulugbek").await;
  let address = s.add_address(tashkent()).await.unwrap();
  let mut update = profile_update(UserType::Other);
  update.address_id = Some(address.address_id);
  s.update_profile(profile.profile_id, update, today()).await.unwrap();
  s.put_faculty(profile.profile_id, faculty("F7"), today()).await.unwrap();

  let view = s
    .materialize_profile(profile.profile_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(view.user.username, "ulugbek");
  assert_eq!(view.address, Some(address));
  assert_eq!(view.profile.user_type, UserType::Faculty);
  assert!(matches!(view.role, RoleRecord::Faculty(ref f) if f.faculty_id == "F7"));

  assert!(s.materialize_profile(Uuid::new_v4()).await.unwrap().is_none());
}

// ─── Role synchronisation ────────────────────────────────────────────────────

#[tokio::test]
async fn saving_a_role_record_tags_the_profile() {
  let s = store().await;
  let profile = register(&s, "jasur").await;

  s.put_staff(profile.profile_id, staff("A1", None, AdminLevel::Basic), today())
    .await
    .unwrap();

  let tagged = s.get_profile(profile.profile_id).await.unwrap().unwrap();
  assert_eq!(tagged.user_type, UserType::Staff);
}

#[tokio::test]
async fn matching_tag_leaves_profile_untouched() {
  let s = store().await;
  let profile = register(&s, "laylo").await;

  s.put_student(profile.profile_id, student("S10001"), today())
    .await
    .unwrap();
  let first = s.get_profile(profile.profile_id).await.unwrap().unwrap();

  let mut again = student("S10001");
  again.credits_completed = 100;
  s.put_student(profile.profile_id, again, today()).await.unwrap();
  let second = s.get_profile(profile.profile_id).await.unwrap().unwrap();

  assert_eq!(second.last_updated, first.last_updated);
  let stored = s.get_student(profile.profile_id).await.unwrap().unwrap();
  assert_eq!(stored.credits_completed, 100);
}

#[tokio::test]
async fn admin_tag_is_overwritten_by_role_record() {
  let s = store().await;
  let profile = register(&s, "otabek").await;
  s.update_profile(profile.profile_id, profile_update(UserType::Admin), today())
    .await
    .unwrap();

  s.put_faculty(profile.profile_id, faculty("F1"), today()).await.unwrap();
  let tagged = s.get_profile(profile.profile_id).await.unwrap().unwrap();
  assert_eq!(tagged.user_type, UserType::Faculty);
}

#[tokio::test]
async fn second_role_kind_requires_clearing_first() {
  let s = store().await;
  let profile = register(&s, "shahlo").await;
  s.put_student(profile.profile_id, student("S1"), today()).await.unwrap();

  let err = s
    .put_faculty(profile.profile_id, faculty("F1"), today())
    .await
    .unwrap_err();
  assert!(conflict_fields(err).contains("role"));
  assert!(s.get_faculty(profile.profile_id).await.unwrap().is_none());

  let cleared = s.clear_role(profile.profile_id).await.unwrap();
  assert_eq!(cleared.user_type, UserType::Other);
  assert!(s.get_student(profile.profile_id).await.unwrap().is_none());

  s.put_faculty(profile.profile_id, faculty("F1"), today()).await.unwrap();
  let tagged = s.get_profile(profile.profile_id).await.unwrap().unwrap();
  assert_eq!(tagged.user_type, UserType::Faculty);
}

#[tokio::test]
async fn role_write_for_missing_profile_is_not_found() {
  let s = store().await;
  let err = s
    .put_student(Uuid::new_v4(), student("S1"), today())
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Core(nexgen_core::Error::NotFound { entity: "profile", .. })
  ));
}

// ─── Students ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn short_program_is_rejected_without_writing() {
  let s = store().await;
  let profile = register(&s, "farrux").await;

  let mut short = student("S10001");
  short.expected_graduation = Some(d(2021, 1, 1));
  let err = s
    .put_student(profile.profile_id, short, today())
    .await
    .unwrap_err();
  assert!(invalid_fields(err).contains("expected_graduation"));

  assert!(s.get_student(profile.profile_id).await.unwrap().is_none());
  let untouched = s.get_profile(profile.profile_id).await.unwrap().unwrap();
  assert_eq!(untouched.user_type, UserType::Other);
}

#[tokio::test]
async fn duplicate_student_id_conflicts() {
  let s = store().await;
  let a = register(&s, "a").await;
  let b = register(&s, "b").await;
  s.put_student(a.profile_id, student("S500"), today()).await.unwrap();

  let err = s
    .put_student(b.profile_id, student("S500"), today())
    .await
    .unwrap_err();
  assert!(conflict_fields(err).contains("student_id"));
  let b = s.get_profile(b.profile_id).await.unwrap().unwrap();
  assert_eq!(b.user_type, UserType::Other);
}

#[tokio::test]
async fn list_students_by_status_and_major() {
  let s = store().await;
  let a = register(&s, "a").await;
  let b = register(&s, "b").await;
  let c = register(&s, "c").await;

  s.put_student(b.profile_id, student("S2"), today()).await.unwrap();
  s.put_student(a.profile_id, student("S1"), today()).await.unwrap();
  let mut on_leave = student("S3");
  on_leave.academic_status = AcademicStatus::OnLeave;
  on_leave.major = "Physics".into();
  s.put_student(c.profile_id, on_leave, today()).await.unwrap();

  let all = s.list_students(StudentQuery::default()).await.unwrap();
  let ids: Vec<_> = all.iter().map(|st| st.student_id.as_str()).collect();
  assert_eq!(ids, ["S1", "S2", "S3"]);

  let active_cs = s
    .list_students(StudentQuery {
      status: Some(AcademicStatus::Active),
      major:  Some("Computer Science".into()),
    })
    .await
    .unwrap();
  assert_eq!(active_cs.len(), 2);
}

// ─── Staff hierarchy ─────────────────────────────────────────────────────────

#[tokio::test]
async fn cycle_through_chain_is_rejected() {
  let s = store().await;
  let a = register(&s, "a").await.profile_id;
  let b = register(&s, "b").await.profile_id;
  let c = register(&s, "c").await.profile_id;

  s.put_staff(a, staff("A1", None, AdminLevel::Basic), today()).await.unwrap();
  s.put_staff(b, staff("A2", Some(a), AdminLevel::Basic), today()).await.unwrap();
  s.put_staff(c, staff("A3", Some(b), AdminLevel::Basic), today()).await.unwrap();

  let err = s
    .put_staff(a, staff("A1", Some(c), AdminLevel::Basic), today())
    .await
    .unwrap_err();
  let fields = invalid_fields(err);
  assert_eq!(fields.get("supervisor"), ["Circular supervision hierarchy detected."]);

  let top = s.get_staff(a).await.unwrap().unwrap();
  assert_eq!(top.supervisor_id, None);
}

#[tokio::test]
async fn self_supervision_is_rejected() {
  let s = store().await;
  let a = register(&s, "a").await.profile_id;
  s.put_staff(a, staff("A1", None, AdminLevel::Basic), today()).await.unwrap();

  let err = s
    .put_staff(a, staff("A1", Some(a), AdminLevel::Basic), today())
    .await
    .unwrap_err();
  assert_eq!(
    invalid_fields(err).get("supervisor"),
    ["A staff member cannot be their own supervisor."]
  );
}

#[tokio::test]
async fn unknown_supervisor_is_rejected() {
  let s = store().await;
  let a = register(&s, "a").await.profile_id;
  let err = s
    .put_staff(a, staff("A1", Some(Uuid::new_v4()), AdminLevel::Basic), today())
    .await
    .unwrap_err();
  assert!(invalid_fields(err).contains("supervisor"));
  assert!(s.get_staff(a).await.unwrap().is_none());
}

#[tokio::test]
async fn supervisor_needs_equal_or_higher_admin_level() {
  let s = store().await;
  let boss = register(&s, "boss").await.profile_id;
  let clerk = register(&s, "clerk").await.profile_id;

  s.put_staff(boss, staff("A1", None, AdminLevel::Intermediate), today())
    .await
    .unwrap();
  let err = s
    .put_staff(clerk, staff("A2", Some(boss), AdminLevel::Advanced), today())
    .await
    .unwrap_err();
  let fields = invalid_fields(err);
  assert_eq!(
    fields.get("supervisor"),
    ["Supervisor must have an equal or higher access level than subordinate."]
  );
  assert!(!fields.contains("admin_level"));

  for level in [AdminLevel::Advanced, AdminLevel::FullAccess] {
    s.put_staff(boss, staff("A1", None, level), today()).await.unwrap();
    s.put_staff(clerk, staff("A2", Some(boss), AdminLevel::Advanced), today())
      .await
      .unwrap();
  }

  // With a level-3 subordinate in place the supervisor cannot drop to 2.
  let err = s
    .put_staff(boss, staff("A1", None, AdminLevel::Intermediate), today())
    .await
    .unwrap_err();
  assert_eq!(
    invalid_fields(err).get("admin_level"),
    ["Admin level cannot be lower than that of a direct subordinate."]
  );
}

#[tokio::test]
async fn subordinates_are_listed_and_detached_on_clear() {
  let s = store().await;
  let boss = register(&s, "boss").await.profile_id;
  let x = register(&s, "x").await.profile_id;
  let y = register(&s, "y").await.profile_id;

  s.put_staff(boss, staff("A1", None, AdminLevel::FullAccess), today())
    .await
    .unwrap();
  s.put_staff(y, staff("A3", Some(boss), AdminLevel::Basic), today()).await.unwrap();
  s.put_staff(x, staff("A2", Some(boss), AdminLevel::Basic), today()).await.unwrap();

  let subs = s.subordinates(boss).await.unwrap();
  let ids: Vec<_> = subs.iter().map(|m| m.staff_id.as_str()).collect();
  assert_eq!(ids, ["A2", "A3"]);

  s.clear_role(boss).await.unwrap();
  assert_eq!(s.get_staff(x).await.unwrap().unwrap().supervisor_id, None);
  assert!(s.subordinates(boss).await.unwrap().is_empty());
}

// ─── Alumni ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn alumni_record_marks_student_graduated() {
  let s = store().await;
  let profile = register(&s, "grad").await;
  s.put_student(profile.profile_id, student("S1"), today()).await.unwrap();

  let alum = s
    .put_alumni(profile.profile_id, alumni(2024), today())
    .await
    .unwrap();
  assert_eq!(alum.engagement_level, EngagementLevel::Medium);

  let st = s.get_student(profile.profile_id).await.unwrap().unwrap();
  assert_eq!(st.academic_status, AcademicStatus::Graduated);

  let by_year = s.list_alumni(Some(2024)).await.unwrap();
  assert_eq!(by_year.len(), 1);
  assert!(s.list_alumni(Some(2023)).await.unwrap().is_empty());
}

#[tokio::test]
async fn alumni_listed_by_year_then_username() {
  let s = store().await;
  let mut ids = Vec::new();
  for (username, student_id, year) in
    [("zafar", "S1", 2023), ("bekzod", "S2", 2024), ("akmal", "S3", 2024)]
  {
    let profile = register(&s, username).await.profile_id;
    s.put_student(profile, student(student_id), today()).await.unwrap();
    s.put_alumni(profile, alumni(year), today()).await.unwrap();
    ids.push(profile);
  }

  let listed: Vec<_> = s
    .list_alumni(None)
    .await
    .unwrap()
    .into_iter()
    .map(|a| a.profile_id)
    .collect();
  assert_eq!(listed, [ids[0], ids[2], ids[1]]);

  let only_2024: Vec<_> = s
    .list_alumni(Some(2024))
    .await
    .unwrap()
    .into_iter()
    .map(|a| a.profile_id)
    .collect();
  assert_eq!(only_2024, [ids[2], ids[1]]);
}

#[tokio::test]
async fn alumni_graduation_year_bounds() {
  let s = store().await;
  let profile = register(&s, "grad").await;
  s.put_student(profile.profile_id, student("S1"), today()).await.unwrap();

  for year in [1949, 2025, 2019] {
    let err = s
      .put_alumni(profile.profile_id, alumni(year), today())
      .await
      .unwrap_err();
    assert!(invalid_fields(err).contains("graduation_year"), "year {year}");
  }

  assert!(s.get_alumni(profile.profile_id).await.unwrap().is_none());
  let st = s.get_student(profile.profile_id).await.unwrap().unwrap();
  assert_eq!(st.academic_status, AcademicStatus::Active);
}

#[tokio::test]
async fn alumni_personal_email_must_differ_from_account() {
  let s = store().await;
  let profile = register(&s, "grad").await;
  s.put_student(profile.profile_id, student("S1"), today()).await.unwrap();

  let mut input = alumni(2024);
  input.personal_email = Some("grad@nexgen.uz".into());
  let err = s
    .put_alumni(profile.profile_id, input, today())
    .await
    .unwrap_err();
  assert!(invalid_fields(err).contains("personal_email"));
}

#[tokio::test]
async fn alumni_require_a_student_and_go_with_it() {
  let s = store().await;
  let profile = register(&s, "grad").await;

  let err = s
    .put_alumni(profile.profile_id, alumni(2024), today())
    .await
    .unwrap_err();
  assert!(matches!(
    err,
    Error::Core(nexgen_core::Error::NotFound { entity: "student", .. })
  ));

  s.put_student(profile.profile_id, student("S1"), today()).await.unwrap();
  s.put_alumni(profile.profile_id, alumni(2024), today()).await.unwrap();
  s.clear_role(profile.profile_id).await.unwrap();
  assert!(s.get_alumni(profile.profile_id).await.unwrap().is_none());
}
