//! Profile — the role-tagged record wrapping every user identity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
  Result,
  address::Address,
  calendar::whole_years,
  user::User,
  validation::{PHONE, blank_as_none, declared_rules},
};

/// Youngest age at which a profile may be held.
pub const MINIMUM_AGE: u32 = 16;

/// The role a profile declares.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
  Student,
  Faculty,
  Staff,
  Admin,
  #[default]
  Other,
}

impl UserType {
  pub fn label(self) -> &'static str {
    match self {
      Self::Student => "Student",
      Self::Faculty => "Faculty Member",
      Self::Staff => "Administrative Staff",
      Self::Admin => "Administrator",
      Self::Other => "Other",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
  pub profile_id:        Uuid,
  pub user_id:           Uuid,
  pub user_type:         UserType,
  pub date_of_birth:     Option<NaiveDate>,
  pub bio:               String,
  pub phone_number:      Option<String>,
  pub emergency_contact: Option<String>,
  pub address_id:        Option<Uuid>,
  pub is_active:         bool,
  pub date_joined:       DateTime<Utc>,
  /// Touched on every write to the profile row, and only then.
  pub last_updated:      DateTime<Utc>,
}

impl Profile {
  /// A fresh profile for a newly registered user.
  pub fn new(user_id: Uuid, now: DateTime<Utc>) -> Self {
    Self {
      profile_id: Uuid::new_v4(),
      user_id,
      user_type: UserType::default(),
      date_of_birth: None,
      bio: String::new(),
      phone_number: None,
      emergency_contact: None,
      address_id: None,
      is_active: true,
      date_joined: now,
      last_updated: now,
    }
  }

  /// Age in whole years on `today`; `None` without a date of birth.
  pub fn age(&self, today: NaiveDate) -> Option<u32> {
    self.date_of_birth.and_then(|dob| whole_years(dob, today))
  }

  /// Email, phone, emergency contact and address with display fallbacks.
  pub fn contact_info(&self, user: &User, address: Option<&Address>) -> ContactInfo {
    const NOT_PROVIDED: &str = "Not provided";
    ContactInfo {
      email:             user.email.clone(),
      phone:             self
        .phone_number
        .clone()
        .unwrap_or_else(|| NOT_PROVIDED.to_owned()),
      emergency_contact: self
        .emergency_contact
        .clone()
        .unwrap_or_else(|| NOT_PROVIDED.to_owned()),
      address:           address
        .map(Address::full_address)
        .unwrap_or_else(|| "No address registered".to_owned()),
    }
  }
}

/// Contact details flattened for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
  pub email:             String,
  pub phone:             String,
  pub emergency_contact: String,
  pub address:           String,
}

/// Replacement values for the editable profile fields.
///
/// `date_joined` and `last_updated` are owned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileUpdate {
  #[serde(default)]
  pub user_type:         UserType,
  #[serde(default)]
  pub date_of_birth:     Option<NaiveDate>,
  #[serde(default)]
  pub bio:               String,
  #[validate(regex(
    path = *PHONE,
    message = "Phone number must be entered in the format: '+999999999'. Up to 15 digits allowed."
  ))]
  #[serde(default, deserialize_with = "blank_as_none")]
  pub phone_number:      Option<String>,
  #[serde(default, deserialize_with = "blank_as_none")]
  pub emergency_contact: Option<String>,
  #[serde(default)]
  pub address_id:        Option<Uuid>,
  #[serde(default = "default_active")]
  pub is_active:         bool,
}

fn default_active() -> bool { true }

impl ProfileUpdate {
  /// Field-level checks that need nothing but the reference date.
  pub fn check(&self, today: NaiveDate) -> Result<()> {
    let mut errors = declared_rules(self);

    if let Some(dob) = self.date_of_birth {
      if dob > today {
        errors.add("date_of_birth", "Date of birth cannot be in the future.");
      } else if whole_years(dob, today).is_some_and(|age| age < MINIMUM_AGE) {
        errors.add(
          "date_of_birth",
          format!("User must be at least {MINIMUM_AGE} years old."),
        );
      }
    }

    errors.into_result()
  }

  /// Apply this update to `profile`, stamping `last_updated` with `now`.
  pub fn apply(self, profile: &mut Profile, now: DateTime<Utc>) {
    profile.user_type = self.user_type;
    profile.date_of_birth = self.date_of_birth;
    profile.bio = self.bio;
    profile.phone_number = self.phone_number.filter(|p| !p.is_empty());
    profile.emergency_contact = self.emergency_contact.filter(|c| !c.is_empty());
    profile.address_id = self.address_id;
    profile.is_active = self.is_active;
    profile.last_updated = now;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
  }

  fn update(dob: Option<NaiveDate>) -> ProfileUpdate {
    ProfileUpdate {
      user_type:         UserType::Other,
      date_of_birth:     dob,
      bio:               String::new(),
      phone_number:      None,
      emergency_contact: None,
      address_id:        None,
      is_active:         true,
    }
  }

  #[test]
  fn age_uses_calendar_years() {
    let mut profile = Profile::new(Uuid::new_v4(), Utc::now());
    assert_eq!(profile.age(d(2024, 1, 1)), None);
    profile.date_of_birth = Some(d(2000, 6, 15));
    assert_eq!(profile.age(d(2024, 6, 14)), Some(23));
    assert_eq!(profile.age(d(2024, 6, 15)), Some(24));
  }

  #[test]
  fn date_of_birth_rules() {
    let today = d(2024, 9, 1);
    assert!(update(Some(d(2008, 9, 1))).check(today).is_ok());

    let Err(crate::Error::Validation(e)) = update(Some(d(2008, 9, 2))).check(today) else {
      panic!("under-age profile accepted");
    };
    assert!(e.get("date_of_birth")[0].contains("at least 16"));

    let Err(crate::Error::Validation(e)) = update(Some(d(2024, 9, 2))).check(today) else {
      panic!("future birth date accepted");
    };
    assert!(e.get("date_of_birth")[0].contains("future"));
  }

  #[test]
  fn phone_format_is_checked() {
    let mut input = update(None);
    input.phone_number = Some("12-34".into());
    let Err(crate::Error::Validation(e)) = input.check(d(2024, 1, 1)) else {
      panic!("malformed phone accepted");
    };
    assert!(e.get("phone_number")[0].starts_with("Phone number must be entered"));
    input.phone_number = Some("+998901234567".into());
    assert!(input.check(d(2024, 1, 1)).is_ok());
  }

  #[test]
  fn blank_contact_fields_deserialize_as_absent() {
    let input: ProfileUpdate =
      serde_json::from_str(r#"{"phone_number":"","emergency_contact":"  "}"#).unwrap();
    assert_eq!(input.phone_number, None);
    assert_eq!(input.emergency_contact, None);
    assert!(input.is_active);
    assert!(input.check(d(2024, 1, 1)).is_ok());
  }

  #[test]
  fn contact_info_fallbacks() {
    let profile = Profile::new(Uuid::new_v4(), Utc::now());
    let user = User {
      user_id:     profile.user_id,
      username:    "aziz".into(),
      email:       "aziz@nexgen.uz".into(),
      first_name:  String::new(),
      last_name:   String::new(),
      date_joined: Utc::now(),
    };
    let info = profile.contact_info(&user, None);
    assert_eq!(info.email, "aziz@nexgen.uz");
    assert_eq!(info.phone, "Not provided");
    assert_eq!(info.emergency_contact, "Not provided");
    assert_eq!(info.address, "No address registered");
  }
}
