use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, EntityTrait};

use crate::models::planned_seminar;
use crate::models::seminar::Model as SeminarModel;
use crate::test_utils::setup_test_db;
use crate::tests::{make_seminar, make_user};

#[tokio::test]
async fn sweep_overdue_flips_flag_and_clears_bookmarks() {
    let db = setup_test_db().await;
    let user = make_user(&db, "alice").await;

    let past = make_seminar(&db, "Long over", -3).await;
    let upcoming = make_seminar(&db, "Still coming", 3).await;

    planned_seminar::ActiveModel {
        user_id: Set(user.id),
        seminar_id: Set(past.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    SeminarModel::sweep_overdue(&db).await.unwrap();

    let past = SeminarModel::find_by_id(&db, past.id).await.unwrap().unwrap();
    assert!(past.is_done);

    let upcoming = SeminarModel::find_by_id(&db, upcoming.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!upcoming.is_done);

    let bookmarks = planned_seminar::Entity::find().all(&db).await.unwrap();
    assert!(bookmarks.is_empty());
}

#[tokio::test]
async fn duplicate_bookmark_is_rejected() {
    let db = setup_test_db().await;
    let user = make_user(&db, "bob").await;
    let seminar = make_seminar(&db, "Popular talk", 3).await;

    let bookmark = planned_seminar::ActiveModel {
        user_id: Set(user.id),
        seminar_id: Set(seminar.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    bookmark.clone().insert(&db).await.unwrap();
    assert!(bookmark.insert(&db).await.is_err());
}

#[tokio::test]
async fn deleting_seminar_cascades_bookmarks() {
    let db = setup_test_db().await;
    let user = make_user(&db, "carol").await;
    let seminar = make_seminar(&db, "Short lived", 3).await;

    planned_seminar::ActiveModel {
        user_id: Set(user.id),
        seminar_id: Set(seminar.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&db)
    .await
    .unwrap();

    crate::models::Seminar::delete_by_id(seminar.id)
        .exec(&db)
        .await
        .unwrap();

    let found =
        planned_seminar::Model::find_for_user_and_seminar(&db, user.id, seminar.id)
            .await
            .unwrap();
    assert!(found.is_none());
}
