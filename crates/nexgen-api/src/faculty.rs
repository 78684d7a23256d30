//! Handlers for faculty records.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use nexgen_core::{faculty::FacultyInput, store::RecordStore};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::ValidatedJson,
  views::{FacultyView, today},
};

/// `PUT /profiles/{id}/faculty`
pub async fn put_one<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  ValidatedJson(body): ValidatedJson<FacultyInput>,
) -> Result<Json<FacultyView>, ApiError> {
  let today = today();
  let faculty = store
    .put_faculty(id, body, today)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(FacultyView::new(faculty, today)))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub department: Option<String>,
}

/// `GET /faculty[?department=<name>]`
pub async fn list<S: RecordStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<FacultyView>>, ApiError> {
  let today = today();
  let members = store
    .list_faculty(params.department)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(
    members
      .into_iter()
      .map(|f| FacultyView::new(f, today))
      .collect(),
  ))
}

/// `GET /faculty/{id}`
pub async fn get_one<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<FacultyView>, ApiError> {
  let faculty = store
    .get_faculty(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("faculty member {id} not found")))?;
  Ok(Json(FacultyView::new(faculty, today())))
}
