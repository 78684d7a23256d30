//! The base user identity that every profile wraps.
//!
//! Credentials and sessions live elsewhere; the records store only needs a
//! stable key, a unique username and email, and a name to display.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
  Result,
  profile::Profile,
  validation::{USERNAME, declared_rules, not_blank},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub user_id:     Uuid,
  pub username:    String,
  pub email:       String,
  pub first_name:  String,
  pub last_name:   String,
  pub date_joined: DateTime<Utc>,
}

impl User {
  /// "First Last", or the username when no name is on file.
  pub fn display_name(&self) -> String {
    let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
    let full = full.trim();
    if full.is_empty() {
      self.username.clone()
    } else {
      full.to_owned()
    }
  }
}

/// Input to [`crate::store::RecordStore::register_user`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewUser {
  #[validate(
    custom(function = "not_blank"),
    length(max = 150, message = "Username must be at most 150 characters."),
    regex(
      path = *USERNAME,
      message = "Username may contain only letters, digits and @/./+/-/_."
    )
  )]
  pub username:   String,
  #[validate(email(message = "Enter a valid email address."))]
  pub email:      String,
  #[serde(default)]
  pub first_name: String,
  #[serde(default)]
  pub last_name:  String,
}

impl NewUser {
  pub fn check(&self) -> Result<()> { declared_rules(self).into_result() }
}

/// The result of registering a user: the identity and the profile created
/// alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
  pub user:    User,
  pub profile: Profile,
}
