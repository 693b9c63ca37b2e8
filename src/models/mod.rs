//! Database models and view DTOs.

pub mod course;
pub mod dashboard;
pub mod user;
