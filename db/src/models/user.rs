use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};

/// Application-level role stored on the `users` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Participant,
}

/// Represents a user in the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Primary key ID (auto-incremented).
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// User's unique email address.
    pub email: String,
    /// Securely hashed password string.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    /// Either `admin` or `participant`.
    pub role: String,
    pub is_email_verified: bool,
    /// Opt-in flag for seminar announcement emails.
    pub email_notifications: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendances,
    #[sea_orm(has_many = "super::planned_seminar::Entity")]
    PlannedSeminars,
    #[sea_orm(has_many = "super::evaluation::Entity")]
    Evaluations,
    #[sea_orm(has_many = "super::certificate_record::Entity")]
    CertificateRecords,
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendances.def()
    }
}

impl Related<super::planned_seminar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlannedSeminars.def()
    }
}

impl Related<super::evaluation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Evaluations.def()
    }
}

impl Related<super::certificate_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CertificateRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Hashes a plaintext password with Argon2 and a fresh salt.
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against this user's stored hash.
    pub fn verify_password(&self, password: &str) -> bool {
        PasswordHash::new(&self.password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    /// Parsed role. Unknown values fall back to `Participant`.
    pub fn role(&self) -> Role {
        Role::from_str(&self.role).unwrap_or(Role::Participant)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim().to_string();
        if name.is_empty() {
            self.username.clone()
        } else {
            name
        }
    }

    /// Creates a user with a hashed password. The caller is expected to have
    /// checked for duplicates; unique indexes back this up at the DB level.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        db: &DatabaseConnection,
        username: &str,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        role: Role,
    ) -> Result<Self, DbErr> {
        let password_hash = Self::hash_password(password)
            .map_err(|e| DbErr::Custom(format!("Failed to hash password: {e}")))?;

        let now = Utc::now();
        let active = ActiveModel {
            username: Set(username.to_owned()),
            email: Set(email.to_owned()),
            password_hash: Set(password_hash),
            first_name: Set(first_name.to_owned()),
            last_name: Set(last_name.to_owned()),
            role: Set(role.to_string()),
            is_email_verified: Set(false),
            email_notifications: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        active.insert(db).await
    }

    pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    pub async fn find_by_email(db: &DatabaseConnection, email: &str) -> Result<Option<Self>, DbErr> {
        Entity::find().filter(Column::Email.eq(email)).one(db).await
    }

    pub async fn find_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::Username.eq(username))
            .one(db)
            .await
    }

    /// Looks up a user by username, falling back to email. Used by login,
    /// which accepts either in a single identifier field.
    pub async fn find_by_username_or_email(
        db: &DatabaseConnection,
        identifier: &str,
    ) -> Result<Option<Self>, DbErr> {
        if let Some(user) = Self::find_by_username(db, identifier).await? {
            return Ok(Some(user));
        }
        Self::find_by_email(db, identifier).await
    }

    /// Resolves the user and checks the password. Returns `None` for both
    /// unknown identifiers and wrong passwords so callers can't tell which.
    pub async fn verify_credentials(
        db: &DatabaseConnection,
        identifier: &str,
        password: &str,
    ) -> Result<Option<Self>, DbErr> {
        match Self::find_by_username_or_email(db, identifier).await? {
            Some(user) if user.verify_password(password) => Ok(Some(user)),
            _ => Ok(None),
        }
    }

    /// Users who should receive new-seminar announcement emails: verified,
    /// opted-in participants.
    pub async fn notification_recipients(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::Role.eq(Role::Participant.to_string()))
            .filter(Column::IsEmailVerified.eq(true))
            .filter(Column::EmailNotifications.eq(true))
            .all(db)
            .await
    }
}
