mod attendance_tests;
mod evaluation_tests;
mod seminar_tests;
mod token_tests;
mod user_tests;

use chrono::{Duration, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection};

use crate::models::seminar;
use crate::models::user::{Model as UserModel, Role};

/// Inserts a participant with a known password.
pub async fn make_user(db: &DatabaseConnection, username: &str) -> UserModel {
    UserModel::create(
        db,
        username,
        &format!("{username}@example.com"),
        "password123",
        "Test",
        "User",
        Role::Participant,
    )
    .await
    .expect("failed to create user")
}

/// Inserts a seminar ending `hours_from_now` hours from now (negative for past).
pub async fn make_seminar(db: &DatabaseConnection, title: &str, hours_from_now: i64) -> seminar::Model {
    let end = Utc::now() + Duration::hours(hours_from_now);
    let start = end - Duration::hours(2);
    let now = Utc::now();
    seminar::ActiveModel {
        title: Set(title.to_string()),
        description: Set(String::new()),
        speaker: Set("Dr. Speaker".to_string()),
        venue: Set("Main Hall".to_string()),
        date_start: Set(start),
        date_end: Set(end),
        duration_minutes: Set(Some(120)),
        is_done: Set(false),
        category_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("failed to create seminar")
}
