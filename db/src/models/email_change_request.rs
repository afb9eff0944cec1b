use chrono::{DateTime, Duration, Utc};
use rand::{Rng, thread_rng};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::IntoActiveModel;
use sea_orm::QueryOrder;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Maximum wrong-code entries before a request is burned.
pub const MAX_ATTEMPTS: i32 = 5;

/// Short-lived OTP record for changing a user's email address. The code is
/// mailed to the *new* address; entering it proves ownership.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "email_change_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub new_email: String,
    pub verification_code: String,
    pub attempts: i32,
    pub is_used: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn new(user_id: i64, new_email: &str, expiry_minutes: i64) -> Self {
        let verification_code = format!("{:06}", thread_rng().gen_range(0..1_000_000u32));

        Self {
            id: 0,
            user_id,
            new_email: new_email.to_owned(),
            verification_code,
            attempts: 0,
            is_used: false,
            created_at: Utc::now(),
            expires_at: Utc::now() + Duration::minutes(expiry_minutes),
        }
    }

    pub async fn create(
        db: &DatabaseConnection,
        user_id: i64,
        new_email: &str,
        expiry_minutes: i64,
    ) -> Result<Self, DbErr> {
        let model = Self::new(user_id, new_email, expiry_minutes);
        let mut active_model = model.into_active_model();
        active_model.id = NotSet;
        active_model.insert(db).await
    }

    /// The user's most recent request that is unused, unexpired and under the
    /// attempt cap.
    pub async fn find_active_for_user(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsUsed.eq(false))
            .filter(Column::ExpiresAt.gt(Utc::now()))
            .filter(Column::Attempts.lt(MAX_ATTEMPTS))
            .order_by_desc(Column::CreatedAt)
            .one(db)
            .await
    }

    pub async fn register_failed_attempt(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let mut active_model: ActiveModel = self.clone().into();
        active_model.attempts = Set(self.attempts + 1);
        active_model.update(db).await?;
        Ok(())
    }

    pub async fn mark_as_used(&self, db: &DatabaseConnection) -> Result<(), DbErr> {
        let mut active_model: ActiveModel = self.clone().into();
        active_model.is_used = Set(true);
        active_model.update(db).await?;
        Ok(())
    }
}
