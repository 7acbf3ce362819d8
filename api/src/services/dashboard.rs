//! Instructor dashboard aggregation flow.
//!
//! Once auth has resolved to an authorized principal, the flow issues the
//! four queries behind the dashboard concurrently, reduces them to summary
//! counts and a single enrolled-student table, and exposes well-defined
//! phases for "still loading", "loaded empty" and "loaded populated".
//!
//! The batch is joined all-or-nothing: one failed query aborts the whole
//! batch, which is caught and logged, and the view degrades to zero counts
//! and an empty table instead of an error screen. Counts are recomputed
//! from scratch on every load, never incrementally updated.

use db::models::course_request::{self, Status as RequestStatus};
use db::models::enrollment::{self, EnrolledStudentRow};
use db::models::timetable_entry;
use db::models::user::Role;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use serde::Serialize;
use std::future::Future;

/// Auth state as seen by the flow at trigger time. Passed in explicitly so
/// the flow can be driven without any ambient session machinery.
#[derive(Debug, Clone)]
pub struct AuthSnapshot {
    pub principal: Option<Principal>,
    /// True while the surrounding auth layer is still resolving the session.
    pub resolving: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub id: i64,
    pub role: Role,
}

/// Filter for the course-request query, mirroring the REST query surface.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRequestFilter {
    pub status: RequestStatus,
    pub instructor_id: Option<i64>,
}

/// The four collections the dashboard is assembled from.
///
/// Implementations must tolerate all four queries being in flight at once;
/// the flow issues them as a single joined batch so total latency is that
/// of the slowest query, not the sum.
pub trait DashboardQueries {
    fn get_course_requests(
        &self,
        filter: CourseRequestFilter,
    ) -> impl Future<Output = Result<Vec<course_request::Model>, DbErr>> + Send;

    fn get_timetable(
        &self,
        teacher_id: i64,
    ) -> impl Future<Output = Result<Vec<timetable_entry::Model>, DbErr>> + Send;

    /// `None` means the backend omitted the collection entirely; the flow
    /// treats that as an empty table.
    fn get_enrolled_students(
        &self,
        instructor_id: i64,
    ) -> impl Future<Output = Result<Option<Vec<EnrolledStudentRow>>, DbErr>> + Send;
}

/// Redirect sink invoked exactly once when an unauthorized principal is seen.
pub trait Navigator {
    fn redirect_to_login(&mut self);
}

/// No-op navigator for contexts where an upstream gate has already rejected
/// unauthorized principals.
impl Navigator for () {
    fn redirect_to_login(&mut self) {}
}

/// Lifecycle of one dashboard mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Auth still resolving: render a loading indicator, fetch nothing.
    Unresolved,
    /// Principal absent or lacking the instructor role. Terminal.
    Unauthorized,
    /// The fetch batch is in flight.
    Loading,
    /// All four fetches have settled (successfully or not). Terminal per
    /// mount; a fresh mount starts over from `Unresolved`.
    Ready,
}

/// Summary counts shown in the stat cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub pending_requests: usize,
    pub accepted_courses: usize,
    pub total_classes: usize,
}

/// Everything the render layer needs: counts, table rows and the phase.
/// `enrolled_students` is always a concrete (possibly empty) list.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub stats: DashboardStats,
    pub enrolled_students: Vec<EnrolledStudentRow>,
    pub phase: Phase,
}

type DepsKey = (bool, Option<(i64, bool)>);

/// State machine driving one dashboard mount:
/// `Unresolved → Unauthorized | Loading → Ready`.
pub struct DashboardFlow {
    phase: Phase,
    stats: DashboardStats,
    enrolled_students: Vec<EnrolledStudentRow>,
    last_deps: Option<DepsKey>,
}

impl Default for DashboardFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardFlow {
    pub fn new() -> Self {
        Self {
            phase: Phase::Unresolved,
            stats: DashboardStats::default(),
            enrolled_students: Vec::new(),
            last_deps: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn view(&self) -> DashboardView {
        DashboardView {
            stats: self.stats,
            enrolled_students: self.enrolled_students.clone(),
            phase: self.phase,
        }
    }

    fn authorized(principal: &Principal) -> bool {
        matches!(principal.role, Role::Instructor | Role::Admin)
    }

    fn deps_key(auth: &AuthSnapshot) -> DepsKey {
        (
            auth.resolving,
            auth.principal
                .as_ref()
                .map(|p| (p.id, Self::authorized(p))),
        )
    }

    /// Drives the state machine. Call whenever one of the inputs changes:
    /// the auth-resolving flag, the principal, or the mount itself.
    ///
    /// - While auth is resolving, nothing happens: no fetch, no redirect.
    /// - An unauthorized principal triggers exactly one redirect and no
    ///   fetches.
    /// - An authorized principal triggers the fetch batch; the flow reaches
    ///   `Ready` even when the batch fails.
    ///
    /// Re-invoking with unchanged inputs after the flow has left
    /// `Unresolved` is a no-op, so a batch is never double-fired.
    pub async fn handle_deps_changed<Q, N>(&mut self, auth: &AuthSnapshot, queries: &Q, nav: &mut N)
    where
        Q: DashboardQueries,
        N: Navigator,
    {
        let key = Self::deps_key(auth);
        if self.last_deps.as_ref() == Some(&key) && self.phase != Phase::Unresolved {
            return;
        }
        self.last_deps = Some(key);

        // Wait for auth to finish resolving.
        if auth.resolving {
            self.phase = Phase::Unresolved;
            return;
        }

        let principal = match auth.principal.as_ref().filter(|p| Self::authorized(p)) {
            Some(principal) => principal.clone(),
            None => {
                self.phase = Phase::Unauthorized;
                nav.redirect_to_login();
                return;
            }
        };

        self.phase = Phase::Loading;
        self.load(&principal, queries).await;
        self.phase = Phase::Ready;
    }

    async fn load<Q: DashboardQueries>(&mut self, principal: &Principal, queries: &Q) {
        self.stats = DashboardStats::default();
        self.enrolled_students = Vec::new();

        let batch = tokio::try_join!(
            queries.get_course_requests(CourseRequestFilter {
                status: RequestStatus::Pending,
                instructor_id: None,
            }),
            queries.get_course_requests(CourseRequestFilter {
                status: RequestStatus::Accepted,
                instructor_id: Some(principal.id),
            }),
            queries.get_timetable(principal.id),
            queries.get_enrolled_students(principal.id),
        );

        match batch {
            Ok((pending, accepted, timetable, students)) => {
                self.stats = DashboardStats {
                    pending_requests: pending.len(),
                    accepted_courses: accepted.len(),
                    total_classes: timetable.len(),
                };
                // An absent payload means no rows; the table never sees a null.
                self.enrolled_students = students.unwrap_or_default();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load dashboard data");
            }
        }
    }
}

/// Live queries backing the dashboard, scoped to one database handle.
pub struct DbDashboardQueries {
    db: DatabaseConnection,
}

impl DbDashboardQueries {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl DashboardQueries for DbDashboardQueries {
    async fn get_course_requests(
        &self,
        filter: CourseRequestFilter,
    ) -> Result<Vec<course_request::Model>, DbErr> {
        let mut query = course_request::Entity::find()
            .filter(course_request::Column::Status.eq(filter.status));
        if let Some(instructor_id) = filter.instructor_id {
            query = query.filter(course_request::Column::InstructorId.eq(instructor_id));
        }
        query.all(&self.db).await
    }

    async fn get_timetable(&self, teacher_id: i64) -> Result<Vec<timetable_entry::Model>, DbErr> {
        timetable_entry::Entity::find()
            .filter(timetable_entry::Column::TeacherId.eq(teacher_id))
            .all(&self.db)
            .await
    }

    async fn get_enrolled_students(
        &self,
        instructor_id: i64,
    ) -> Result<Option<Vec<EnrolledStudentRow>>, DbErr> {
        enrollment::Model::enrolled_rows_for_instructor(&self.db, instructor_id)
            .await
            .map(Some)
    }
}
