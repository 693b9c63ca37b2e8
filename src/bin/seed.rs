//! Seed script for development — populates a fresh database with a demo learner.
//!
//! Usage: `cargo run --bin seed`
//!
//! Requires `DATABASE_URL` (reads .env).

use learnboard::models::user::CreateUser;
use learnboard::services::auth as auth_service;
use sqlx::PgPool;
use uuid::Uuid;

const LEARNER_EMAIL: &str = "learner@learnboard.local";
const LEARNER_PASSWORD: &str = "Learn123!";

/// (title, slug, duration minutes, level, category, days since update)
const COURSES: &[(&str, &str, Option<i32>, &str, &str, i32)] = &[
    ("Rust Fundamentals", "rust-fundamentals", Some(540), "BEGINNER", "Programming", 3),
    ("Async Rust in Practice", "async-rust", Some(360), "ADVANCED", "Programming", 10),
    ("SQL for Analysts", "sql-for-analysts", Some(240), "INTERMEDIATE", "Data", 1),
    ("Statistics Refresher", "statistics-refresher", None, "BEGINNER", "Data", 30),
    ("Typography Basics", "typography-basics", Some(120), "BEGINNER", "Design", 7),
];

/// (slug, status, progress percent, favorite)
const ENROLLMENTS: &[(&str, &str, Option<f64>, bool)] = &[
    ("rust-fundamentals", "COMPLETED", Some(100.0), false),
    ("async-rust", "IN_PROGRESS", Some(35.0), true),
    ("sql-for-analysts", "IN_PROGRESS", Some(60.0), false),
    ("statistics-refresher", "NOT_STARTED", None, true),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let db_url = std::env::var("DATABASE_URL")?;
    let pool = learnboard::db::create_pool(&db_url, 5).await?;

    learnboard::db::run_migrations(&pool).await?;

    println!("=== learnboard seed ===");

    let learner_id = seed_learner(&pool).await?;
    seed_courses(&pool).await?;
    seed_enrollments(&pool, learner_id).await?;

    println!("\n=== Seed complete! ===");
    println!("Learner login: {LEARNER_EMAIL} / {LEARNER_PASSWORD}");

    Ok(())
}

async fn seed_learner(pool: &PgPool) -> anyhow::Result<Uuid> {
    let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(LEARNER_EMAIL)
        .fetch_optional(pool)
        .await?;

    if let Some(id) = existing {
        let hash = auth_service::hash_password(LEARNER_PASSWORD)?;
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(&hash)
            .bind(id)
            .execute(pool)
            .await?;
        println!("[done] Updated learner password");
        return Ok(id);
    }

    let user = auth_service::create_user(
        pool,
        &CreateUser {
            email: LEARNER_EMAIL.to_string(),
            password: LEARNER_PASSWORD.to_string(),
            display_name: Some("Demo Learner".to_string()),
        },
    )
    .await?;
    println!("[done] Created learner account");
    Ok(user.id)
}

async fn seed_courses(pool: &PgPool) -> anyhow::Result<()> {
    for (title, slug, duration, level, category, days_ago) in COURSES {
        let category_id: Uuid = sqlx::query_scalar(
            "INSERT INTO categories (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(category)
        .fetch_one(pool)
        .await?;

        sqlx::query(
            "INSERT INTO courses (title, slug, duration, level, category_id, updated_at)
             VALUES ($1, $2, $3, $4::course_level, $5, NOW() - make_interval(days => $6))
             ON CONFLICT (slug) DO NOTHING",
        )
        .bind(title)
        .bind(slug)
        .bind(duration)
        .bind(level)
        .bind(category_id)
        .bind(days_ago)
        .execute(pool)
        .await?;
    }

    println!("[done] Seeded {} courses", COURSES.len());
    Ok(())
}

async fn seed_enrollments(pool: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
    for (slug, status, progress, favorite) in ENROLLMENTS {
        let course_id: Uuid = sqlx::query_scalar("SELECT id FROM courses WHERE slug = $1")
            .bind(slug)
            .fetch_one(pool)
            .await?;

        sqlx::query(
            "INSERT INTO enrollments (user_id, course_id, status, progress_percent)
             VALUES ($1, $2, $3::enrollment_status, $4)
             ON CONFLICT (user_id, course_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(status)
        .bind(progress)
        .execute(pool)
        .await?;

        if *favorite {
            sqlx::query(
                "INSERT INTO favorites (user_id, course_id) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
            )
            .bind(user_id)
            .bind(course_id)
            .execute(pool)
            .await?;
        }
    }

    println!("[done] Seeded {} enrollments", ENROLLMENTS.len());
    Ok(())
}
