//! Handlers for `/users` endpoints.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `POST`   | `/users`      | Creates the user and its profile |
//! | `GET`    | `/users/{id}` | 404 if not found |
//! | `DELETE` | `/users/{id}` | Removes the profile and role records too |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use nexgen_core::{
  store::RecordStore,
  user::{NewUser, User},
};
use uuid::Uuid;

use crate::{error::ApiError, extract::ValidatedJson};

/// `POST /users` — body: `{"username":"...","email":"..."}`
pub async fn register<S: RecordStore>(
  State(store): State<Arc<S>>,
  ValidatedJson(body): ValidatedJson<NewUser>,
) -> Result<impl IntoResponse, ApiError> {
  let registration = store
    .register_user(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(registration)))
}

/// `GET /users/{id}`
pub async fn get_one<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<User>, ApiError> {
  let user = store
    .get_user(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("user {id} not found")))?;
  Ok(Json(user))
}

/// `DELETE /users/{id}`
pub async fn remove<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_user(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
