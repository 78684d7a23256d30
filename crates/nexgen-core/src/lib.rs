//! Core types and trait definitions for the NexGen university records store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Every validator and derived-field calculator takes the reference date as
//! an explicit argument; nothing in here reads the wall clock.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod address;
pub mod alumni;
pub mod calendar;
pub mod error;
pub mod faculty;
pub mod hierarchy;
pub mod profile;
pub mod role;
pub mod staff;
pub mod store;
pub mod student;
pub mod user;
pub mod validation;

pub use error::{DomainFailure, Error, Result};
pub use validation::FieldErrors;
