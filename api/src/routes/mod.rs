//! HTTP route entry point for `/api/...`.
//!
//! This module defines all HTTP entry points under the `/api` namespace.
//! Routes are organized by domain (e.g., authentication, students,
//! timetable, health), each protected via appropriate access control
//! middleware.
//!
//! Route groups include:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Authentication endpoints (register, login, public)
//! - `/students` → Student registration, catalog lookups and role-gated queries
//! - `/timetable` → Course requests and timetable entries (authenticated users)
//! - `/me` → User-specific endpoints (instructor dashboard)

use crate::routes::{
    auth::auth_routes, health::health_routes, me::me_routes, students::student_routes,
    timetable::timetable_routes,
};
use axum::Router;
use util::state::AppState;

pub mod auth;
pub mod health;
pub mod me;
pub mod students;
pub mod timetable;

/// Builds the complete application router for all HTTP endpoints.
///
/// # Route Structure:
/// - `/health` → Health check endpoint (no authentication required).
/// - `/auth` → Authentication endpoints (register, login).
/// - `/students` → Public registration/catalog routes plus admin- and
///   instructor-gated queries (gating is applied inside the group).
/// - `/timetable` → Course request and timetable queries (authenticated).
/// - `/me` → User-specific endpoints (instructor dashboard).
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/students", student_routes())
        .nest("/timetable", timetable_routes())
        .nest("/me", me_routes())
        .with_state(app_state)
}
