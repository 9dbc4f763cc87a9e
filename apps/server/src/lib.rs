//! Coinvest HTTP server.
//!
//! Wires the domain services from `coinvest-core` and the SQLite
//! repositories from `coinvest-storage-sqlite` into an axum application:
//! JWT auth, the REST surface under `/api/v1`, and the background accrual
//! scheduler.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod main_lib;
pub mod models;
pub mod scheduler;

pub use main_lib::{build_state, init_tracing, AppState};
