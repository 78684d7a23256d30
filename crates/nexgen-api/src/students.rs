//! Handlers for student records.
//!
//! | Method | Path                     | Notes |
//! |--------|--------------------------|-------|
//! | `PUT`  | `/profiles/{id}/student` | Creates or replaces; tags the profile |
//! | `GET`  | `/students`              | Optional `?status=...&major=...` |
//! | `GET`  | `/students/{id}`         | `id` is the profile id |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use nexgen_core::{
  store::{RecordStore, StudentQuery},
  student::{AcademicStatus, StudentInput},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::ValidatedJson,
  views::{StudentView, today},
};

/// `PUT /profiles/{id}/student`
pub async fn put_one<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  ValidatedJson(body): ValidatedJson<StudentInput>,
) -> Result<Json<StudentView>, ApiError> {
  let today = today();
  let student = store
    .put_student(id, body, today)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(StudentView::new(student, today)))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub status: Option<AcademicStatus>,
  pub major:  Option<String>,
}

/// `GET /students[?status=<status>][&major=<major>]`
pub async fn list<S: RecordStore>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<StudentView>>, ApiError> {
  let today = today();
  let students = store
    .list_students(StudentQuery { status: params.status, major: params.major })
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(
    students
      .into_iter()
      .map(|s| StudentView::new(s, today))
      .collect(),
  ))
}

/// `GET /students/{id}`
pub async fn get_one<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<StudentView>, ApiError> {
  let student = store
    .get_student(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("student {id} not found")))?;
  Ok(Json(StudentView::new(student, today())))
}
