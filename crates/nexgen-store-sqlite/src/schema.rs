//! SQL schema for the NexGen SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id     TEXT PRIMARY KEY,
    username    TEXT NOT NULL UNIQUE,
    email       TEXT NOT NULL UNIQUE COLLATE NOCASE,
    first_name  TEXT NOT NULL DEFAULT '',
    last_name   TEXT NOT NULL DEFAULT '',
    date_joined TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS addresses (
    address_id  TEXT PRIMARY KEY,
    street      TEXT NOT NULL,
    city        TEXT NOT NULL,
    region      TEXT NOT NULL,
    postal_code TEXT,
    country     TEXT NOT NULL
);

-- One profile per user, removed with it.
CREATE TABLE IF NOT EXISTS profiles (
    profile_id        TEXT PRIMARY KEY,
    user_id           TEXT NOT NULL UNIQUE REFERENCES users(user_id) ON DELETE CASCADE,
    user_type         TEXT NOT NULL DEFAULT 'other',  -- student|faculty|staff|admin|other
    date_of_birth     TEXT,
    bio               TEXT NOT NULL DEFAULT '',
    phone_number      TEXT,
    emergency_contact TEXT,
    address_id        TEXT REFERENCES addresses(address_id) ON DELETE SET NULL,
    is_active         INTEGER NOT NULL DEFAULT 1,
    date_joined       TEXT NOT NULL,
    last_updated      TEXT NOT NULL
);

-- Role tables are keyed by profile: at most one row of each kind per
-- profile. The triggers below forbid holding two kinds at once.
CREATE TABLE IF NOT EXISTS students (
    profile_id          TEXT PRIMARY KEY REFERENCES profiles(profile_id) ON DELETE CASCADE,
    student_id          TEXT NOT NULL UNIQUE,
    enrollment_date     TEXT NOT NULL,
    expected_graduation TEXT,
    major               TEXT NOT NULL DEFAULT '',
    academic_status     TEXT NOT NULL DEFAULT 'active',
    gpa                 REAL CHECK (gpa IS NULL OR (gpa >= 0 AND gpa <= 4)),
    credits_completed   INTEGER NOT NULL DEFAULT 0 CHECK (credits_completed >= 0),
    CHECK (expected_graduation IS NULL OR expected_graduation > enrollment_date)
);

CREATE TABLE IF NOT EXISTS faculty_members (
    profile_id         TEXT PRIMARY KEY REFERENCES profiles(profile_id) ON DELETE CASCADE,
    faculty_id         TEXT NOT NULL UNIQUE,
    position           TEXT NOT NULL,
    hire_date          TEXT NOT NULL,
    department         TEXT NOT NULL,
    highest_degree     TEXT NOT NULL DEFAULT '',
    alma_mater         TEXT,
    office_location    TEXT NOT NULL DEFAULT '',
    office_hours       TEXT NOT NULL DEFAULT '',
    specialization     TEXT NOT NULL DEFAULT '',
    research_interests TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS staff_members (
    profile_id       TEXT PRIMARY KEY REFERENCES profiles(profile_id) ON DELETE CASCADE,
    staff_id         TEXT NOT NULL UNIQUE,
    department       TEXT NOT NULL,
    position         TEXT NOT NULL,
    hire_date        TEXT NOT NULL,
    responsibilities TEXT NOT NULL DEFAULT '',
    supervisor_id    TEXT REFERENCES staff_members(profile_id) ON DELETE SET NULL,
    admin_level      INTEGER NOT NULL DEFAULT 1 CHECK (admin_level BETWEEN 1 AND 4),
    CHECK (supervisor_id IS NULL OR supervisor_id != profile_id)
);

CREATE TABLE IF NOT EXISTS alumni (
    profile_id        TEXT PRIMARY KEY REFERENCES students(profile_id) ON DELETE CASCADE,
    graduation_year   INTEGER NOT NULL CHECK (graduation_year >= 1950),
    degree            TEXT NOT NULL DEFAULT '',
    current_employer  TEXT NOT NULL DEFAULT '',
    job_title         TEXT NOT NULL DEFAULT '',
    personal_email    TEXT,
    is_donor          INTEGER NOT NULL DEFAULT 0,
    last_contact_date TEXT,
    engagement_level  INTEGER NOT NULL DEFAULT 1 CHECK (engagement_level BETWEEN 1 AND 3)
);

CREATE TRIGGER IF NOT EXISTS students_single_role BEFORE INSERT ON students
WHEN EXISTS (SELECT 1 FROM faculty_members WHERE profile_id = NEW.profile_id)
  OR EXISTS (SELECT 1 FROM staff_members   WHERE profile_id = NEW.profile_id)
BEGIN
    SELECT RAISE(ABORT, 'profile already holds a role record');
END;

CREATE TRIGGER IF NOT EXISTS faculty_single_role BEFORE INSERT ON faculty_members
WHEN EXISTS (SELECT 1 FROM students      WHERE profile_id = NEW.profile_id)
  OR EXISTS (SELECT 1 FROM staff_members WHERE profile_id = NEW.profile_id)
BEGIN
    SELECT RAISE(ABORT, 'profile already holds a role record');
END;

CREATE TRIGGER IF NOT EXISTS staff_single_role BEFORE INSERT ON staff_members
WHEN EXISTS (SELECT 1 FROM students        WHERE profile_id = NEW.profile_id)
  OR EXISTS (SELECT 1 FROM faculty_members WHERE profile_id = NEW.profile_id)
BEGIN
    SELECT RAISE(ABORT, 'profile already holds a role record');
END;

CREATE INDEX IF NOT EXISTS profiles_type_active_idx ON profiles(user_type, is_active);
CREATE INDEX IF NOT EXISTS students_status_idx      ON students(academic_status);
CREATE INDEX IF NOT EXISTS faculty_department_idx   ON faculty_members(department, position);
CREATE INDEX IF NOT EXISTS staff_department_idx     ON staff_members(department);
CREATE INDEX IF NOT EXISTS staff_supervisor_idx     ON staff_members(supervisor_id);
CREATE INDEX IF NOT EXISTS alumni_year_idx          ON alumni(graduation_year);

PRAGMA user_version = 1;
";
