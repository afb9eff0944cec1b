use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "seminars")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub speaker: String,
    pub venue: String,
    pub date_start: DateTime<Utc>,
    pub date_end: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub is_done: bool,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendances,
    #[sea_orm(has_many = "super::planned_seminar::Entity")]
    PlannedSeminars,
    #[sea_orm(has_many = "super::evaluation::Entity")]
    Evaluations,
    #[sea_orm(has_one = "super::seminar_qr_code::Entity")]
    QrCode,
    #[sea_orm(has_one = "super::certificate_template::Entity")]
    CertificateTemplate,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
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

impl Related<super::seminar_qr_code::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QrCode.def()
    }
}

impl Related<super::certificate_template::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CertificateTemplate.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub async fn find_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Flips `is_done` on every seminar whose end date has passed and removes
    /// their planned bookmarks. Called before listing so stale seminars never
    /// surface as upcoming.
    pub async fn sweep_overdue(db: &DatabaseConnection) -> Result<(), DbErr> {
        let now = Utc::now();
        let overdue = Entity::find()
            .filter(Column::IsDone.eq(false))
            .filter(Column::DateEnd.lt(now))
            .all(db)
            .await?;

        for seminar in overdue {
            let seminar_id = seminar.id;
            let mut active: ActiveModel = seminar.into();
            active.is_done = Set(true);
            active.updated_at = Set(now);
            active.update(db).await?;

            super::planned_seminar::Entity::delete_many()
                .filter(super::planned_seminar::Column::SeminarId.eq(seminar_id))
                .exec(db)
                .await?;
        }
        Ok(())
    }

    /// Removes every planned bookmark pointing at this seminar. Called when a
    /// seminar is explicitly marked done.
    pub async fn clear_planned(db: &DatabaseConnection, seminar_id: i64) -> Result<(), DbErr> {
        super::planned_seminar::Entity::delete_many()
            .filter(super::planned_seminar::Column::SeminarId.eq(seminar_id))
            .exec(db)
            .await?;
        Ok(())
    }
}
