//! Handlers for `/profiles` endpoints.
//!
//! | Method   | Path                   | Notes |
//! |----------|------------------------|-------|
//! | `GET`    | `/profiles`            | Optional `?user_type=...&active=true\|false` |
//! | `GET`    | `/profiles/{id}`       | Profile with account, address and role record |
//! | `PUT`    | `/profiles/{id}`       | Replaces the editable fields |
//! | `DELETE` | `/profiles/{id}/role`  | Drops the role record, resets the tag |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use nexgen_core::{
  profile::{Profile, ProfileUpdate, UserType},
  store::{ProfileQuery, RecordStore},
  user::User,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::ValidatedJson,
  views::{ProfileDetail, today},
};

/// The account behind a profile, if both still exist.
pub(crate) async fn account_of<S: RecordStore>(
  store: &S,
  profile_id: Uuid,
) -> Result<Option<User>, ApiError> {
  let Some(profile) = store
    .get_profile(profile_id)
    .await
    .map_err(ApiError::from_store)?
  else {
    return Ok(None);
  };
  store
    .get_user(profile.user_id)
    .await
    .map_err(ApiError::from_store)
}

async fn detail<S: RecordStore>(store: &S, id: Uuid) -> Result<ProfileDetail, ApiError> {
  let view = store
    .materialize_profile(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("profile {id} not found")))?;
  Ok(ProfileDetail::new(view, today()))
}

// ─── List ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub user_type: Option<UserType>,
  pub active:    Option<bool>,
}

/// `GET /profiles[?user_type=<type>][&active=<bool>]`
pub async fn list<S: RecordStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Profile>>, ApiError> {
  let profiles = store
    .list_profiles(ProfileQuery {
      user_type: params.user_type,
      active:    params.active,
    })
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(profiles))
}

// ─── Single profile ──────────────────────────────────────────────────────────

/// `GET /profiles/{id}`
pub async fn get_one<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<ProfileDetail>, ApiError> {
  Ok(Json(detail(store.as_ref(), id).await?))
}

/// `PUT /profiles/{id}`
pub async fn update<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  ValidatedJson(body): ValidatedJson<ProfileUpdate>,
) -> Result<Json<ProfileDetail>, ApiError> {
  store
    .update_profile(id, body, today())
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(detail(store.as_ref(), id).await?))
}

/// `DELETE /profiles/{id}/role`
pub async fn clear_role<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Profile>, ApiError> {
  let profile = store.clear_role(id).await.map_err(ApiError::from_store)?;
  Ok(Json(profile))
}
