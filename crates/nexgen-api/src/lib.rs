//! JSON REST API for NexGen records.
//!
//! Exposes an axum [`Router`] backed by any
//! [`nexgen_core::store::RecordStore`]. Auth, TLS, and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", nexgen_api::api_router(store.clone()))
//! ```

pub mod addresses;
pub mod alumni;
pub mod error;
pub mod extract;
pub mod faculty;
pub mod profiles;
pub mod staff;
pub mod students;
pub mod users;
pub mod views;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use nexgen_core::store::RecordStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RecordStore + 'static,
{
  Router::new()
    // Users
    .route("/users", post(users::register::<S>))
    .route("/users/{id}", get(users::get_one::<S>).delete(users::remove::<S>))
    // Addresses
    .route("/addresses", get(addresses::list::<S>).post(addresses::create::<S>))
    .route(
      "/addresses/{id}",
      get(addresses::get_one::<S>)
        .put(addresses::replace::<S>)
        .delete(addresses::remove::<S>),
    )
    // Profiles and role records
    .route("/profiles", get(profiles::list::<S>))
    .route(
      "/profiles/{id}",
      get(profiles::get_one::<S>).put(profiles::update::<S>),
    )
    .route("/profiles/{id}/student", put(students::put_one::<S>))
    .route("/profiles/{id}/faculty", put(faculty::put_one::<S>))
    .route("/profiles/{id}/staff", put(staff::put_one::<S>))
    .route("/profiles/{id}/role", delete(profiles::clear_role::<S>))
    // Students and alumni
    .route("/students", get(students::list::<S>))
    .route("/students/{id}", get(students::get_one::<S>))
    .route(
      "/students/{id}/alumni",
      get(alumni::get_one::<S>).put(alumni::put_one::<S>),
    )
    .route("/alumni", get(alumni::list::<S>))
    // Faculty
    .route("/faculty", get(faculty::list::<S>))
    .route("/faculty/{id}", get(faculty::get_one::<S>))
    // Staff
    .route("/staff", get(staff::list::<S>))
    .route("/staff/{id}", get(staff::get_one::<S>))
    .route("/staff/{id}/subordinates", get(staff::subordinates::<S>))
    .with_state(store)
}
