use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Audit log of sent certificates. The image itself is never stored.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "certificate_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub seminar_id: i64,
    pub user_id: i64,
    pub email: String,
    pub sent_at: DateTime<Utc>,
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
    /// Records that a certificate went out. A resend refreshes `sent_at` and
    /// the address it went to instead of inserting a second row.
    pub async fn upsert_sent(
        db: &DatabaseConnection,
        seminar_id: i64,
        user_id: i64,
        email: &str,
    ) -> Result<Self, DbErr> {
        let existing = Entity::find()
            .filter(Column::SeminarId.eq(seminar_id))
            .filter(Column::UserId.eq(user_id))
            .one(db)
            .await?;

        match existing {
            Some(record) => {
                let mut active: ActiveModel = record.into();
                active.email = Set(email.to_owned());
                active.sent_at = Set(Utc::now());
                active.update(db).await
            }
            None => {
                let active = ActiveModel {
                    seminar_id: Set(seminar_id),
                    user_id: Set(user_id),
                    email: Set(email.to_owned()),
                    sent_at: Set(Utc::now()),
                    ..Default::default()
                };
                active.insert(db).await
            }
        }
    }

    pub async fn for_user(db: &DatabaseConnection, user_id: i64) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .all(db)
            .await
    }
}
