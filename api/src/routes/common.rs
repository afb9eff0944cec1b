//! Response shapes shared by more than one route group.

use db::models::seminar::Model as SeminarModel;
use db::models::user::Model as UserModel;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_email_verified: bool,
    pub email_notifications: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserModel> for UserResponse {
    fn from(user: UserModel) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            is_email_verified: user.is_email_verified,
            email_notifications: user.email_notifications,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeminarResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub speaker: String,
    pub venue: String,
    pub date_start: String,
    pub date_end: String,
    pub duration_minutes: Option<i32>,
    pub is_done: bool,
    pub category_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<SeminarModel> for SeminarResponse {
    fn from(seminar: SeminarModel) -> Self {
        Self {
            id: seminar.id,
            title: seminar.title,
            description: seminar.description,
            speaker: seminar.speaker,
            venue: seminar.venue,
            date_start: seminar.date_start.to_rfc3339(),
            date_end: seminar.date_end.to_rfc3339(),
            duration_minutes: seminar.duration_minutes,
            is_done: seminar.is_done,
            category_id: seminar.category_id,
            created_at: seminar.created_at.to_rfc3339(),
            updated_at: seminar.updated_at.to_rfc3339(),
        }
    }
}
