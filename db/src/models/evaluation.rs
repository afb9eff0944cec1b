use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Post-attendance rating form. Five 1-5 categories plus free-text
/// suggestions. One row per (user, seminar); completed rows are immutable.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub seminar_id: i64,
    pub content_and_relevance: i16,
    pub presenters_effectiveness: i16,
    pub organization_and_structure: i16,
    pub materials_usefulness: i16,
    pub overall_satisfaction: i16,
    pub suggestions: String,
    pub is_completed: bool,
    pub created_at: DateTime<Utc>,
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
    #[sea_orm(
        belongs_to = "super::seminar::Entity",
        from = "Column::SeminarId",
        to = "super::seminar::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Seminar,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::seminar::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seminar.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn find_for_user_and_seminar(
        db: &DatabaseConnection,
        user_id: i64,
        seminar_id: i64,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::SeminarId.eq(seminar_id))
            .one(db)
            .await
    }

    pub async fn completed_for_seminar(
        db: &DatabaseConnection,
        seminar_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::SeminarId.eq(seminar_id))
            .filter(Column::IsCompleted.eq(true))
            .all(db)
            .await
    }

    pub async fn has_completed(
        db: &DatabaseConnection,
        user_id: i64,
        seminar_id: i64,
    ) -> Result<bool, DbErr> {
        Ok(Self::find_for_user_and_seminar(db, user_id, seminar_id)
            .await?
            .map(|e| e.is_completed)
            .unwrap_or(false))
    }

    pub fn ratings(&self) -> [i16; 5] {
        [
            self.content_and_relevance,
            self.presenters_effectiveness,
            self.organization_and_structure,
            self.materials_usefulness,
            self.overall_satisfaction,
        ]
    }
}
