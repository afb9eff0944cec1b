use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

// Fallback layout used when a seminar has no template of its own.
pub const DEFAULT_WIDTH: i32 = 2000;
pub const DEFAULT_HEIGHT: i32 = 1414;
pub const DEFAULT_NAME_X_PERCENT: f32 = 50.0;
pub const DEFAULT_NAME_Y_PERCENT: f32 = 38.9;
pub const DEFAULT_NAME_FONT_SIZE: i32 = 128;
pub const DEFAULT_NAME_COLOR: &str = "#000000";
pub const DEFAULT_TITLE_X_PERCENT: f32 = 50.0;
pub const DEFAULT_TITLE_Y_PERCENT: f32 = 28.3;
pub const DEFAULT_TITLE_FONT_SIZE: i32 = 80;
pub const DEFAULT_TITLE_COLOR: &str = "#1a1a1a";
pub const DEFAULT_FONT: &str = "Arial.ttf";

/// Background image plus percentage-based text placement for a seminar's
/// certificates. One per seminar.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "certificate_templates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub seminar_id: i64,
    /// Relative path under the media root; `None` means the default template.
    pub image_path: Option<String>,
    pub template_width: i32,
    pub template_height: i32,
    pub name_x_percent: f32,
    pub name_y_percent: f32,
    pub name_font_size: i32,
    pub name_font: String,
    pub name_color: String,
    pub title_x_percent: f32,
    pub title_y_percent: f32,
    pub title_font_size: i32,
    pub title_font: String,
    pub title_color: String,
    pub show_title: bool,
    pub default_used: bool,
    pub uploaded_at: DateTime<Utc>,
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

    /// A template row carrying only the default configuration, used when a
    /// seminar has none. Not persisted.
    pub fn default_for_seminar(seminar_id: i64) -> Self {
        Self {
            id: 0,
            seminar_id,
            image_path: None,
            template_width: DEFAULT_WIDTH,
            template_height: DEFAULT_HEIGHT,
            name_x_percent: DEFAULT_NAME_X_PERCENT,
            name_y_percent: DEFAULT_NAME_Y_PERCENT,
            name_font_size: DEFAULT_NAME_FONT_SIZE,
            name_font: DEFAULT_FONT.to_string(),
            name_color: DEFAULT_NAME_COLOR.to_string(),
            title_x_percent: DEFAULT_TITLE_X_PERCENT,
            title_y_percent: DEFAULT_TITLE_Y_PERCENT,
            title_font_size: DEFAULT_TITLE_FONT_SIZE,
            title_font: DEFAULT_FONT.to_string(),
            title_color: DEFAULT_TITLE_COLOR.to_string(),
            show_title: true,
            default_used: true,
            uploaded_at: Utc::now(),
        }
    }
}
