//! View DTOs handed to the dashboard page.

use serde::Serialize;
use uuid::Uuid;

use crate::models::course::{CourseLevel, Enrollment};

/// Summary counters shown beside the course list.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub in_progress_count: usize,
    pub completed_count: usize,
    pub hours_spent: i64,
}

/// One row in the "My Courses" list.
#[derive(Debug, Clone, Serialize)]
pub struct CourseCard {
    pub enrollment_id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub slug: String,
    pub href: String,
    pub category_name: String,
    pub thumbnail_url: String,
    pub progress_percent: Option<f64>,
    pub progress_label: i64,
    pub is_complete: bool,
    pub is_favorite: bool,
}

impl CourseCard {
    pub fn new(enrollment: &Enrollment, is_favorite: bool) -> Self {
        let course = &enrollment.course;
        Self {
            enrollment_id: enrollment.id,
            course_id: enrollment.course_id,
            title: course.title.clone(),
            slug: course.slug.clone(),
            href: course.href(),
            category_name: course.category.name.clone(),
            thumbnail_url: course.thumbnail_or_default().to_string(),
            progress_percent: enrollment.progress_percent,
            progress_label: enrollment.progress_label(),
            is_complete: enrollment.is_complete(),
            is_favorite,
        }
    }
}

/// The "resume learning" banner.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeCourse {
    pub enrollment_id: Uuid,
    pub title: String,
    pub href: String,
    pub category_name: String,
    pub level: CourseLevel,
    pub progress_percent: Option<f64>,
    pub progress_label: i64,
}

impl From<&Enrollment> for ResumeCourse {
    fn from(enrollment: &Enrollment) -> Self {
        let course = &enrollment.course;
        Self {
            enrollment_id: enrollment.id,
            title: course.title.clone(),
            href: course.href(),
            category_name: course.category.name.clone(),
            level: course.level,
            progress_percent: enrollment.progress_percent,
            progress_label: enrollment.progress_label(),
        }
    }
}

/// Everything the dashboard page renders for one learner.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub greeting_name: String,
    pub stats: DashboardStats,
    pub courses: Vec<CourseCard>,
    /// Absent when the learner has no enrollments.
    pub resume: Option<ResumeCourse>,
}
