//! Learner dashboard: enrollment queries and the aggregation behind the page.
//!
//! The aggregation is a pure function over already-fetched rows:
//! - Favorite annotation by course id lookup
//! - Status counters and estimated hours spent
//! - Ranking: favorites first, then most recently updated course
//! - Active course: first in-progress enrollment, else the first enrollment

use std::cmp::Ordering;
use std::collections::HashSet;

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::course::{round_half_up, Enrollment, EnrollmentRow, EnrollmentStatus};
use crate::models::dashboard::{CourseCard, DashboardStats, DashboardView, ResumeCourse};
use crate::services::auth as auth_service;

/// An enrollment annotated with the learner's favorite flag for its course.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoritedEnrollment {
    pub enrollment: Enrollment,
    pub is_favorite: bool,
}

/// Result of aggregating one learner's enrollments.
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub ranked: Vec<FavoritedEnrollment>,
    pub active: Option<Enrollment>,
}

impl DashboardSummary {
    pub fn into_view(self, greeting_name: String) -> DashboardView {
        DashboardView {
            greeting_name,
            stats: self.stats,
            courses: self
                .ranked
                .iter()
                .map(|item| CourseCard::new(&item.enrollment, item.is_favorite))
                .collect(),
            resume: self.active.as_ref().map(ResumeCourse::from),
        }
    }
}

/// Aggregate enrollments into counters, a ranked list and the active course.
///
/// `enrollments` is taken in its original order; that order decides ties in
/// the ranking and which enrollment becomes active. Inputs are not validated.
pub fn aggregate(enrollments: &[Enrollment], favorite_course_ids: &HashSet<Uuid>) -> DashboardSummary {
    let mut ranked: Vec<FavoritedEnrollment> = enrollments
        .iter()
        .map(|enrollment| FavoritedEnrollment {
            is_favorite: favorite_course_ids.contains(&enrollment.course_id),
            enrollment: enrollment.clone(),
        })
        .collect();
    // sort_by is stable.
    ranked.sort_by(rank_order);

    DashboardSummary {
        stats: compute_stats(enrollments),
        ranked,
        active: select_active(enrollments).cloned(),
    }
}

/// Favorites first, then course `updated_at` descending.
fn rank_order(a: &FavoritedEnrollment, b: &FavoritedEnrollment) -> Ordering {
    b.is_favorite.cmp(&a.is_favorite).then_with(|| {
        b.enrollment
            .course
            .updated_at
            .cmp(&a.enrollment.course.updated_at)
    })
}

fn compute_stats(enrollments: &[Enrollment]) -> DashboardStats {
    let count = |status: EnrollmentStatus| enrollments.iter().filter(|e| e.status == status).count();
    let total_minutes: f64 = enrollments.iter().map(Enrollment::minutes_watched).sum();

    DashboardStats {
        in_progress_count: count(EnrollmentStatus::InProgress),
        completed_count: count(EnrollmentStatus::Completed),
        hours_spent: round_half_up(total_minutes / 60.0),
    }
}

fn select_active(enrollments: &[Enrollment]) -> Option<&Enrollment> {
    enrollments
        .iter()
        .find(|e| e.status == EnrollmentStatus::InProgress)
        .or_else(|| enrollments.first())
}

/// Load the dashboard for a signed-in learner.
pub async fn load(pool: &PgPool, user_id: Uuid) -> Result<DashboardView, AppError> {
    let (user, enrollments, favorite_course_ids) = tokio::try_join!(
        auth_service::find_user_by_id(pool, user_id),
        fetch_enrollments(pool, user_id),
        fetch_favorite_course_ids(pool, user_id),
    )
    .map_err(|e| {
        // A token for a user that no longer exists is treated as signed out.
        if e.is_not_found() {
            AppError::Unauthorized
        } else {
            e
        }
    })?;

    let summary = aggregate(&enrollments, &favorite_course_ids);
    tracing::debug!(
        user_id = %user_id,
        enrollments = enrollments.len(),
        favorites = favorite_course_ids.len(),
        hours_spent = summary.stats.hours_spent,
        "Dashboard aggregated"
    );

    Ok(summary.into_view(user.greeting_name()))
}

/// Fetch a learner's enrollments with course and category, in enrollment order.
pub async fn fetch_enrollments(pool: &PgPool, user_id: Uuid) -> Result<Vec<Enrollment>, AppError> {
    let rows = sqlx::query_as::<_, EnrollmentRow>(
        r#"
        SELECT
            e.id,
            e.course_id,
            e.status,
            e.progress_percent,
            c.title         AS course_title,
            c.slug          AS course_slug,
            c.duration      AS course_duration,
            c.thumbnail_url AS course_thumbnail_url,
            c.level         AS course_level,
            c.updated_at    AS course_updated_at,
            cat.id          AS category_id,
            cat.name        AS category_name
        FROM enrollments e
        INNER JOIN courses c ON c.id = e.course_id
        INNER JOIN categories cat ON cat.id = c.category_id
        WHERE e.user_id = $1
        ORDER BY e.created_at, e.id
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Enrollment::from).collect())
}

/// Fetch the ids of every course the learner has favorited.
pub async fn fetch_favorite_course_ids(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<HashSet<Uuid>, AppError> {
    let ids = sqlx::query_scalar::<_, Uuid>("SELECT course_id FROM favorites WHERE user_id = $1")
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(ids.into_iter().collect())
}
