//! Mailing addresses, shared by any number of profiles.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
  Result,
  validation::{UZ_POSTAL_CODE, blank_as_none, declared_rules, not_blank},
};

pub const DEFAULT_COUNTRY: &str = "Uzbekistan";

fn default_country() -> String { DEFAULT_COUNTRY.to_owned() }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
  pub address_id:  Uuid,
  pub street:      String,
  /// City or locality.
  pub city:        String,
  /// Province or region.
  pub region:      String,
  pub postal_code: Option<String>,
  pub country:     String,
}

impl Address {
  /// Street, city, region, postal code (if any) and country, comma-joined.
  pub fn full_address(&self) -> String {
    let mut parts = vec![
      self.street.as_str(),
      self.city.as_str(),
      self.region.as_str(),
    ];
    if let Some(code) = self.postal_code.as_deref().filter(|c| !c.is_empty()) {
      parts.push(code);
    }
    parts.push(&self.country);
    parts.join(", ")
  }
}

impl fmt::Display for Address {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{}, {}, {}, {}",
      self.street, self.city, self.region, self.country
    )
  }
}

/// Input for creating or replacing an [`Address`].
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewAddress {
  #[validate(custom(function = "not_blank"))]
  pub street:      String,
  #[validate(custom(function = "not_blank"))]
  pub city:        String,
  #[validate(custom(function = "not_blank"))]
  pub region:      String,
  #[serde(default, deserialize_with = "blank_as_none")]
  pub postal_code: Option<String>,
  #[validate(custom(function = "not_blank"))]
  #[serde(default = "default_country")]
  pub country:     String,
}

impl NewAddress {
  pub fn check(&self) -> Result<()> {
    let mut errors = declared_rules(self);

    if let Some(code) = self.postal_code.as_deref().filter(|c| !c.is_empty())
      && self.country.trim().eq_ignore_ascii_case(DEFAULT_COUNTRY)
      && !UZ_POSTAL_CODE.is_match(code)
    {
      errors.add("postal_code", "Uzbekistan postal codes must be 6 digits.");
    }

    errors.into_result()
  }

  pub fn into_address(self, address_id: Uuid) -> Address {
    Address {
      address_id,
      street: self.street,
      city: self.city,
      region: self.region,
      postal_code: self.postal_code.filter(|c| !c.is_empty()),
      country: self.country,
    }
  }
}
