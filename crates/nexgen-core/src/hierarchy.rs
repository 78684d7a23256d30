//! Integrity rules for the staff supervision tree.
//!
//! Each staff member has at most one supervisor, so the "supervises" relation
//! is a forest of in-trees. Checking a proposed link is a walk up a singly
//! linked chain, not a general graph search.

use std::collections::HashSet;

use thiserror::Error;
use uuid::Uuid;

use crate::staff::AdminLevel;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HierarchyError<E> {
  #[error("A staff member cannot be their own supervisor.")]
  SelfSupervision,

  #[error("Circular supervision hierarchy detected.")]
  Cycle,

  /// The walk exceeded the number of staff records; stored data is
  /// inconsistent.
  #[error("Supervision chain does not terminate within {limit} steps.")]
  Unterminated { limit: usize },

  #[error("supervisor lookup failed: {0}")]
  Lookup(E),
}

/// Validate that `staff` may report to `proposed`.
///
/// `supervisor_of` returns the *currently stored* supervisor of a staff
/// member (or `None` for the top of a chain or an unknown id). `limit` caps
/// the walk and should be the number of staff records, counting `staff`
/// itself.
pub fn check_supervisor_chain<F, E>(
  staff: Uuid,
  proposed: Option<Uuid>,
  limit: usize,
  mut supervisor_of: F,
) -> Result<(), HierarchyError<E>>
where
  F: FnMut(Uuid) -> Result<Option<Uuid>, E>,
{
  let Some(first) = proposed else {
    return Ok(());
  };
  if first == staff {
    return Err(HierarchyError::SelfSupervision);
  }

  let mut visited = HashSet::from([staff]);
  let mut current = Some(first);
  let mut steps = 0;

  while let Some(id) = current {
    if !visited.insert(id) {
      return Err(HierarchyError::Cycle);
    }
    steps += 1;
    if steps > limit {
      return Err(HierarchyError::Unterminated { limit });
    }
    current = supervisor_of(id).map_err(HierarchyError::Lookup)?;
  }

  Ok(())
}

/// A supervisor must hold at least the access level of their subordinate.
pub fn check_supervisor_level(
  subordinate: AdminLevel,
  supervisor: AdminLevel,
) -> Result<(), &'static str> {
  if supervisor < subordinate {
    Err("Supervisor must have an equal or higher access level than subordinate.")
  } else {
    Ok(())
  }
}
