//! Field-keyed validation failures, and the declarative rules the input
//! types share through `#[derive(Validate)]`.
//!
//! Rules that depend on the reference date or on other records stay in each
//! input's `check` method; they add to the same [`FieldErrors`].

use std::{borrow::Cow, collections::BTreeMap, fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{Error, Result};

// ─── FieldErrors ─────────────────────────────────────────────────────────────

/// Validation messages grouped by field name, in field order.
///
/// Serialises as a plain JSON object: `{"student_id": ["..."]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
  pub fn new() -> Self { Self::default() }

  pub fn single(field: &str, message: impl Into<String>) -> Self {
    let mut errors = Self::new();
    errors.add(field, message);
    errors
  }

  pub fn add(&mut self, field: &str, message: impl Into<String>) {
    self.0.entry(field.to_owned()).or_default().push(message.into());
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn contains(&self, field: &str) -> bool { self.0.contains_key(field) }

  /// Messages recorded against `field`; empty if none.
  pub fn get(&self, field: &str) -> &[String] {
    self.0.get(field).map(Vec::as_slice).unwrap_or_default()
  }

  /// Fold `other` into this set, keeping message order per field.
  pub fn extend(&mut self, other: FieldErrors) {
    for (field, messages) in other.0 {
      self.0.entry(field).or_default().extend(messages);
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
  }

  /// `Ok(())` if nothing was recorded, otherwise [`Error::Validation`].
  pub fn into_result(self) -> Result<()> {
    if self.is_empty() {
      Ok(())
    } else {
      Err(Error::Validation(self))
    }
  }
}

impl fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (field, messages) in &self.0 {
      for message in messages {
        if !first {
          f.write_str("; ")?;
        }
        write!(f, "{field}: {message}")?;
        first = false;
      }
    }
    Ok(())
  }
}

impl From<&ValidationErrors> for FieldErrors {
  fn from(errors: &ValidationErrors) -> Self {
    let mut out = Self::new();
    for (field, list) in errors.field_errors() {
      for error in list.iter() {
        let message = error
          .message
          .as_ref()
          .map(|m| m.to_string())
          .unwrap_or_else(|| format!("{field} is invalid."));
        out.add(&field, message);
      }
    }
    out
  }
}

/// Run the `#[validate(...)]` rules declared on `input`.
pub fn declared_rules(input: &impl Validate) -> FieldErrors {
  match input.validate() {
    Ok(()) => FieldErrors::new(),
    Err(errors) => FieldErrors::from(&errors),
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

fn pattern(re: &str) -> Regex { Regex::new(re).expect("valid regex") }

/// An optional `+`, an optional leading `1`, then 9–15 digits.
pub static PHONE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^\+?1?\d{9,15}$"));

pub static USERNAME: LazyLock<Regex> = LazyLock::new(|| pattern(r"^[\w.@+-]+$"));

pub static STUDENT_ID: LazyLock<Regex> = LazyLock::new(|| pattern(r"^S\d+$"));

pub static FACULTY_ID: LazyLock<Regex> = LazyLock::new(|| pattern(r"^F\d+$"));

pub static STAFF_ID: LazyLock<Regex> = LazyLock::new(|| pattern(r"^A\d+$"));

pub static UZ_POSTAL_CODE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^\d{6}$"));

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
  if value.trim().is_empty() {
    Err(
      ValidationError::new("blank")
        .with_message(Cow::Borrowed("This field may not be blank.")),
    )
  } else {
    Ok(())
  }
}

/// Deserialize an optional string, treating `""` and whitespace as absent.
pub fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  let value = Option::<String>::deserialize(deserializer)?;
  Ok(value.filter(|s| !s.trim().is_empty()))
}
