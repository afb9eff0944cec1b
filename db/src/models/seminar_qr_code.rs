use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::Serialize;
use uuid::Uuid;

use super::attendance::ScanAction;

/// The two opaque scan credentials for a seminar. Generated once and reused
/// on every later QR request.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "seminar_qr_codes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub seminar_id: i64,
    pub qr_token_check_in: String,
    pub qr_token_check_out: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seminar::Entity",
        from = "Column::SeminarId",
        to = "super::seminar::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Seminar,
}

impl Related<super::seminar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seminar.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn find_for_seminar(
        db: &DatabaseConnection,
        seminar_id: i64,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::SeminarId.eq(seminar_id))
            .one(db)
            .await
    }

    pub async fn get_or_create(db: &DatabaseConnection, seminar_id: i64) -> Result<Self, DbErr> {
        if let Some(existing) = Self::find_for_seminar(db, seminar_id).await? {
            return Ok(existing);
        }

        let active = ActiveModel {
            seminar_id: Set(seminar_id),
            qr_token_check_in: Set(Uuid::new_v4().to_string()),
            qr_token_check_out: Set(Uuid::new_v4().to_string()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        active.insert(db).await
    }

    /// The stored token for the given scan action.
    pub fn token_for(&self, action: ScanAction) -> &str {
        match action {
            ScanAction::CheckIn => &self.qr_token_check_in,
            ScanAction::CheckOut => &self.qr_token_check_out,
        }
    }
}
