use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::services::dashboard::{
    AuthSnapshot, DashboardFlow, DbDashboardQueries, Principal,
};
use axum::{Extension, Json, extract::State, response::IntoResponse};
use util::state::AppState;

/// GET /api/me/dashboard
///
/// Runs the dashboard aggregation flow for the acting instructor: pending
/// course requests, accepted courses, scheduled classes and the
/// enrolled-student table, fetched concurrently and reduced to one payload.
/// Requires instructor privileges.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "stats": {
///       "pending_requests": 2,
///       "accepted_courses": 1,
///       "total_classes": 3
///     },
///     "enrolled_students": [ /* one row per (student, course) pair */ ],
///     "phase": "ready"
///   },
///   "message": "Dashboard loaded"
/// }
/// ```
///
/// A failed fetch batch still yields `200 OK` with zero counts and an empty
/// student list; the failure is logged server-side.
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
) -> impl IntoResponse {
    let queries = DbDashboardQueries::new(app_state.db_clone());
    let auth = AuthSnapshot {
        principal: Some(Principal {
            id: claims.sub,
            role: claims.role,
        }),
        resolving: false,
    };

    let mut flow = DashboardFlow::new();
    // The route gate has already rejected unauthorized principals.
    let mut nav = ();
    flow.handle_deps_changed(&auth, &queries, &mut nav).await;

    Json(ApiResponse::success(flow.view(), "Dashboard loaded"))
}
