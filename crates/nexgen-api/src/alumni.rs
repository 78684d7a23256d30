//! Handlers for alumni records.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use chrono::NaiveDate;
use nexgen_core::{
  alumni::{Alumni, AlumniInput},
  store::RecordStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::ValidatedJson,
  profiles::account_of,
  views::{AlumniView, today},
};

async fn view<S: RecordStore>(
  store: &S,
  alumni: Alumni,
  today: NaiveDate,
) -> Result<AlumniView, ApiError> {
  let graduate = account_of(store, alumni.profile_id)
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("profile {} not found", alumni.profile_id)))?;
  Ok(AlumniView::new(alumni, &graduate, today))
}

/// `PUT /students/{id}/alumni` — also marks the student graduated.
pub async fn put_one<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  ValidatedJson(body): ValidatedJson<AlumniInput>,
) -> Result<Json<AlumniView>, ApiError> {
  let today = today();
  let alumni = store
    .put_alumni(id, body, today)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(view(store.as_ref(), alumni, today).await?))
}

/// `GET /students/{id}/alumni`
pub async fn get_one<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<AlumniView>, ApiError> {
  let alumni = store
    .get_alumni(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("alumni record {id} not found")))?;
  Ok(Json(view(store.as_ref(), alumni, today()).await?))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub graduation_year: Option<i32>,
}

/// `GET /alumni[?graduation_year=<year>]`
pub async fn list<S: RecordStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<AlumniView>>, ApiError> {
  let today = today();
  let records = store
    .list_alumni(params.graduation_year)
    .await
    .map_err(ApiError::from_store)?;
  let mut out = Vec::with_capacity(records.len());
  for alumni in records {
    out.push(view(store.as_ref(), alumni, today).await?);
  }
  Ok(Json(out))
}
