//! Role records and the rule that keeps a profile's role tag honest.
//!
//! A profile holds at most one role record. The read model expresses that as
//! a single tagged variant, [`RoleRecord`]; the store writes a role record and
//! the profile's [`UserType`] tag in the same transaction.

use serde::{Deserialize, Serialize};

use crate::{
  address::Address,
  faculty::FacultyMember,
  profile::{Profile, UserType},
  staff::StaffMember,
  student::Student,
  user::User,
};

/// The kinds of role record a profile can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleKind {
  Student,
  Faculty,
  Staff,
}

impl RoleKind {
  /// The profile tag implied by holding a record of this kind.
  pub fn user_type(self) -> UserType {
    match self {
      Self::Student => UserType::Student,
      Self::Faculty => UserType::Faculty,
      Self::Staff => UserType::Staff,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Student => "student",
      Self::Faculty => "faculty",
      Self::Staff => "staff",
    }
  }
}

/// The tag to write when a record of kind `record` is saved against a
/// profile currently tagged `current`; `None` when nothing needs writing.
pub fn reconcile_user_type(current: UserType, record: RoleKind) -> Option<UserType> {
  let wanted = record.user_type();
  (current != wanted).then_some(wanted)
}

/// The tag a profile should fall back to once its role record is removed.
pub fn cleared_user_type(current: UserType) -> UserType {
  match current {
    UserType::Student | UserType::Faculty | UserType::Staff => UserType::Other,
    other => other,
  }
}

/// The single role record attached to a profile, if any.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum RoleRecord {
  #[default]
  None,
  Student(Student),
  Faculty(FacultyMember),
  Staff(StaffMember),
}

impl RoleRecord {
  pub fn kind(&self) -> Option<RoleKind> {
    match self {
      Self::None => None,
      Self::Student(_) => Some(RoleKind::Student),
      Self::Faculty(_) => Some(RoleKind::Faculty),
      Self::Staff(_) => Some(RoleKind::Staff),
    }
  }

  /// Whether `tag` is consistent with this record: any tag is allowed when
  /// no record is held, otherwise it must match the record's kind.
  pub fn permits(&self, tag: UserType) -> bool {
    self.kind().is_none_or(|kind| kind.user_type() == tag)
  }
}

/// The computed read model for a profile — never stored, always derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
  pub user:    User,
  pub profile: Profile,
  pub address: Option<Address>,
  pub role:    RoleRecord,
}
