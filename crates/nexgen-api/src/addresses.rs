//! Handlers for `/addresses` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use nexgen_core::{
  address::{Address, NewAddress},
  store::RecordStore,
};
use uuid::Uuid;

use crate::{error::ApiError, extract::ValidatedJson};

/// `GET /addresses`
pub async fn list<S: RecordStore>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Address>>, ApiError> {
  let addresses = store.list_addresses().await.map_err(ApiError::from_store)?;
  Ok(Json(addresses))
}

/// `POST /addresses`
pub async fn create<S: RecordStore>(
  State(store): State<Arc<S>>,
  ValidatedJson(body): ValidatedJson<NewAddress>,
) -> Result<impl IntoResponse, ApiError> {
  let address = store.add_address(body).await.map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(address)))
}

/// `GET /addresses/{id}`
pub async fn get_one<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Address>, ApiError> {
  let address = store
    .get_address(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("address {id} not found")))?;
  Ok(Json(address))
}

/// `PUT /addresses/{id}`
pub async fn replace<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  ValidatedJson(body): ValidatedJson<NewAddress>,
) -> Result<Json<Address>, ApiError> {
  let address = store
    .update_address(id, body)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(address))
}

/// `DELETE /addresses/{id}` — profiles using the address are detached.
pub async fn remove<S: RecordStore>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
  store.delete_address(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}
