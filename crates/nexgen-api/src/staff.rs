//! Handlers for staff records and the supervision tree.
//!
//! | Method | Path                       | Notes |
//! |--------|----------------------------|-------|
//! | `PUT`  | `/profiles/{id}/staff`     | Supervisor link is checked for cycles |
//! | `GET`  | `/staff`                   | Optional `?department=...` |
//! | `GET`  | `/staff/{id}`              | |
//! | `GET`  | `/staff/{id}/subordinates` | Direct reports only |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::NaiveDate;
use nexgen_core::{
  staff::{StaffInput, StaffMember},
  store::RecordStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::ValidatedJson,
  profiles::account_of,
  views::{StaffContext, StaffView, today},
};

async fn view<S: RecordStore>(
  store: &S,
  staff: StaffMember,
  today: NaiveDate,
) -> Result<StaffView, ApiError> {
  let supervisor = match staff.supervisor_id {
    Some(id) => store.get_staff(id).await.map_err(ApiError::from_store)?,
    None => None,
  };
  let supervisor_name = match &supervisor {
    Some(sup) => account_of(store, sup.profile_id)
      .await?
      .map(|user| user.display_name()),
    None => None,
  };
  let subordinate_count = store
    .subordinates(staff.profile_id)
    .await
    .map_err(ApiError::from_store)?
    .len();

  Ok(StaffView::new(
    staff,
    StaffContext { supervisor, supervisor_name, subordinate_count },
    today,
  ))
}

async fn view_all<S: RecordStore>(
  store: &S,
  members: Vec<StaffMember>,
) -> Result<Vec<StaffView>, ApiError> {
  let today = today();
  let mut out = Vec::with_capacity(members.len());
  for member in members {
    out.push(view(store, member, today).await?);
  }
  Ok(out)
}

/// `PUT /profiles/{id}/staff`
pub async fn put_one<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  ValidatedJson(body): ValidatedJson<StaffInput>,
) -> Result<Json<StaffView>, ApiError> {
  let today = today();
  let staff = store
    .put_staff(id, body, today)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(view(store.as_ref(), staff, today).await?))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub department: Option<String>,
}

/// `GET /staff[?department=<name>]`
pub async fn list<S: RecordStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<StaffView>>, ApiError> {
  let members = store
    .list_staff(params.department)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(view_all(store.as_ref(), members).await?))
}

/// `GET /staff/{id}`
pub async fn get_one<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<StaffView>, ApiError> {
  let staff = store
    .get_staff(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("staff member {id} not found")))?;
  Ok(Json(view(store.as_ref(), staff, today()).await?))
}

/// `GET /staff/{id}/subordinates`
pub async fn subordinates<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<StaffView>>, ApiError> {
  if store
    .get_staff(id)
    .await
    .map_err(ApiError::from_store)?
    .is_none()
  {
    return Err(ApiError::NotFound(format!("staff member {id} not found")));
  }
  let members = store.subordinates(id).await.map_err(ApiError::from_store)?;
  Ok(Json(view_all(store.as_ref(), members).await?))
}
