use chrono::{DateTime, Duration, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// One attendance row per (user, seminar). `is_present` is derived: it is
/// recomputed on every write and true only when both timestamps are set.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub seminar_id: i64,
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    pub is_present: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
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

/// Which of the two scan actions a QR token authorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanAction {
    CheckIn,
    CheckOut,
}

impl ScanAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "check_in" => Some(Self::CheckIn),
            "check_out" => Some(Self::CheckOut),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CheckIn => "check_in",
            Self::CheckOut => "check_out",
        }
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Already checked in")]
    AlreadyCheckedIn,
    #[error("Already checked out")]
    AlreadyCheckedOut,
    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Scans are accepted until this long after the seminar's end date: the
/// nominal hour of overrun plus a 15 minute grace window.
pub const SCAN_GRACE_MINUTES: i64 = 75;

impl Model {
    /// Whether a scan at `at` still falls inside the seminar's attendance
    /// window (`date_end` plus the grace period).
    pub fn scan_window_open(date_end: DateTime<Utc>, at: DateTime<Utc>) -> bool {
        at <= date_end + Duration::minutes(SCAN_GRACE_MINUTES)
    }

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

    pub async fn get_or_create(
        db: &DatabaseConnection,
        user_id: i64,
        seminar_id: i64,
    ) -> Result<Self, DbErr> {
        if let Some(existing) = Self::find_for_user_and_seminar(db, user_id, seminar_id).await? {
            return Ok(existing);
        }

        let now = Utc::now();
        let active = ActiveModel {
            user_id: Set(user_id),
            seminar_id: Set(seminar_id),
            check_in: Set(None),
            check_out: Set(None),
            is_present: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        active.insert(db).await
    }

    /// Applies a scan to this row. Rejects a repeat of an action whose
    /// timestamp is already set, then stores the timestamp and recomputes
    /// `is_present`.
    pub async fn apply_scan(
        &self,
        db: &DatabaseConnection,
        action: ScanAction,
        at: DateTime<Utc>,
    ) -> Result<Self, ScanError> {
        match action {
            ScanAction::CheckIn if self.check_in.is_some() => {
                return Err(ScanError::AlreadyCheckedIn);
            }
            ScanAction::CheckOut if self.check_out.is_some() => {
                return Err(ScanError::AlreadyCheckedOut);
            }
            _ => {}
        }

        let (check_in, check_out) = match action {
            ScanAction::CheckIn => (Some(at), self.check_out),
            ScanAction::CheckOut => (self.check_in, Some(at)),
        };

        let mut active: ActiveModel = self.clone().into();
        active.check_in = Set(check_in);
        active.check_out = Set(check_out);
        active.is_present = Set(check_in.is_some() && check_out.is_some());
        active.updated_at = Set(Utc::now());
        Ok(active.update(db).await?)
    }

    /// Seminars the user was fully present at, for evaluation gating.
    pub async fn present_for_user(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsPresent.eq(true))
            .all(db)
            .await
    }

    /// Participants (not admins) marked present at a seminar.
    pub async fn present_participants(
        db: &DatabaseConnection,
        seminar_id: i64,
    ) -> Result<Vec<super::user::Model>, DbErr> {
        Entity::find()
            .filter(Column::SeminarId.eq(seminar_id))
            .filter(Column::IsPresent.eq(true))
            .find_also_related(super::user::Entity)
            .all(db)
            .await
            .map(|rows| {
                rows.into_iter()
                    .filter_map(|(_, user)| user)
                    .filter(|u| !u.is_admin())
                    .collect()
            })
    }
}
