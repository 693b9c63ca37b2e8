//! Course catalog and enrollment models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Image shown for courses that have no thumbnail of their own.
pub const DEFAULT_THUMBNAIL: &str = "/thumbnail.jpeg";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "enrollment_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    NotStarted,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "course_level", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Beginner => write!(f, "Beginner"),
            Self::Intermediate => write!(f, "Intermediate"),
            Self::Advanced => write!(f, "Advanced"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    /// Length in minutes.
    pub duration: Option<i32>,
    pub thumbnail_url: Option<String>,
    pub level: CourseLevel,
    pub updated_at: DateTime<Utc>,
    pub category: Category,
}

impl Course {
    /// Link to the course page.
    pub fn href(&self) -> String {
        format!("/courses/{}", self.slug)
    }

    pub fn thumbnail_or_default(&self) -> &str {
        self.thumbnail_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_THUMBNAIL)
    }
}

/// A learner's enrollment with its course and category attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enrollment {
    pub id: Uuid,
    pub course_id: Uuid,
    pub status: EnrollmentStatus,
    /// Not range-checked; values outside 0..=100 are kept as stored.
    pub progress_percent: Option<f64>,
    pub course: Course,
}

impl Enrollment {
    /// Minutes of the course covered so far, with missing fields counted as zero.
    pub fn minutes_watched(&self) -> f64 {
        let duration = f64::from(self.course.duration.unwrap_or(0));
        let progress = self.progress_percent.unwrap_or(0.0);
        duration * (progress / 100.0)
    }

    /// Whole-number progress for display.
    pub fn progress_label(&self) -> i64 {
        round_half_up(self.progress_percent.unwrap_or(0.0))
    }

    pub fn is_complete(&self) -> bool {
        self.progress_percent.unwrap_or(0.0) >= 100.0
    }
}

/// Round to the nearest integer with ties going toward positive infinity.
pub fn round_half_up(value: f64) -> i64 {
    // Compare the fractional part instead of adding 0.5, which loses precision
    // just below one half and above 2^52.
    let floor = value.floor();
    let rounded = if value - floor >= 0.5 { floor + 1.0 } else { floor };
    rounded as i64
}

/// Flat row produced by the enrollment ⋈ course ⋈ category query.
#[derive(Debug, FromRow)]
pub struct EnrollmentRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub status: EnrollmentStatus,
    pub progress_percent: Option<f64>,
    pub course_title: String,
    pub course_slug: String,
    pub course_duration: Option<i32>,
    pub course_thumbnail_url: Option<String>,
    pub course_level: CourseLevel,
    pub course_updated_at: DateTime<Utc>,
    pub category_id: Uuid,
    pub category_name: String,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Self {
            id: row.id,
            course_id: row.course_id,
            status: row.status,
            progress_percent: row.progress_percent,
            course: Course {
                id: row.course_id,
                title: row.course_title,
                slug: row.course_slug,
                duration: row.course_duration,
                thumbnail_url: row.course_thumbnail_url,
                level: row.course_level,
                updated_at: row.course_updated_at,
                category: Category {
                    id: row.category_id,
                    name: row.category_name,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> EnrollmentRow {
        EnrollmentRow {
            id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            status: EnrollmentStatus::InProgress,
            progress_percent: Some(42.5),
            course_title: "Intro to Rust".to_string(),
            course_slug: "intro-to-rust".to_string(),
            course_duration: Some(90),
            course_thumbnail_url: None,
            course_level: CourseLevel::Beginner,
            course_updated_at: Utc::now(),
            category_id: Uuid::new_v4(),
            category_name: "Programming".to_string(),
        }
    }

    #[test]
    fn row_nests_course_and_category() {
        let r = row();
        let course_id = r.course_id;
        let category_id = r.category_id;
        let enrollment = Enrollment::from(r);
        assert_eq!(enrollment.course.id, course_id);
        assert_eq!(enrollment.course.category.id, category_id);
        assert_eq!(enrollment.course.category.name, "Programming");
    }

    #[test]
    fn href_and_thumbnail_fallback() {
        let mut enrollment = Enrollment::from(row());
        assert_eq!(enrollment.course.href(), "/courses/intro-to-rust");
        assert_eq!(enrollment.course.thumbnail_or_default(), DEFAULT_THUMBNAIL);

        enrollment.course.thumbnail_url = Some(String::new());
        assert_eq!(enrollment.course.thumbnail_or_default(), DEFAULT_THUMBNAIL);

        enrollment.course.thumbnail_url = Some("/img/rust.png".to_string());
        assert_eq!(enrollment.course.thumbnail_or_default(), "/img/rust.png");
    }

    #[test]
    fn minutes_watched_treats_missing_as_zero() {
        let mut enrollment = Enrollment::from(row());
        assert!((enrollment.minutes_watched() - 38.25).abs() < 1e-9);

        enrollment.progress_percent = None;
        assert_eq!(enrollment.minutes_watched(), 0.0);

        enrollment.progress_percent = Some(50.0);
        enrollment.course.duration = None;
        assert_eq!(enrollment.minutes_watched(), 0.0);
    }

    #[test]
    fn progress_label_and_completion() {
        let mut enrollment = Enrollment::from(row());
        assert_eq!(enrollment.progress_label(), 43);
        assert!(!enrollment.is_complete());

        enrollment.progress_percent = Some(100.0);
        assert!(enrollment.is_complete());

        enrollment.progress_percent = Some(120.0);
        assert_eq!(enrollment.progress_label(), 120);
        assert!(enrollment.is_complete());
    }

    #[test]
    fn round_half_up_ties_go_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn round_half_up_keeps_float_edges() {
        assert_eq!(round_half_up(0.49999999999999994), 0);
        assert_eq!(round_half_up(4503599627370497.0), 4503599627370497);
        assert_eq!(round_half_up(-0.49999999999999994), 0);
    }

    #[test]
    fn status_serializes_screaming_snake() {
        let json = serde_json::to_string(&EnrollmentStatus::InProgress).unwrap();
        assert_eq!(json, "\"IN_PROGRESS\"");
        assert_eq!(CourseLevel::Intermediate.to_string(), "Intermediate");
    }
}
