use sea_orm::ActiveValue::Set;
use sea_orm::ActiveModelTrait;

use crate::models::certificate_record::Model as CertRecordModel;
use crate::models::evaluation;
use crate::test_utils::setup_test_db;
use crate::tests::{make_seminar, make_user};

async fn insert_evaluation(
    db: &sea_orm::DatabaseConnection,
    user_id: i64,
    seminar_id: i64,
    completed: bool,
) -> evaluation::Model {
    evaluation::ActiveModel {
        user_id: Set(user_id),
        seminar_id: Set(seminar_id),
        content_and_relevance: Set(5),
        presenters_effectiveness: Set(4),
        organization_and_structure: Set(4),
        materials_usefulness: Set(3),
        overall_satisfaction: Set(5),
        suggestions: Set(String::new()),
        is_completed: Set(completed),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

#[tokio::test]
async fn has_completed_reflects_flag() {
    let db = setup_test_db().await;
    let user = make_user(&db, "alice").await;
    let seminar = make_seminar(&db, "Rust 201", 2).await;

    assert!(
        !evaluation::Model::has_completed(&db, user.id, seminar.id)
            .await
            .unwrap()
    );

    insert_evaluation(&db, user.id, seminar.id, false).await;
    assert!(
        !evaluation::Model::has_completed(&db, user.id, seminar.id)
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn completed_for_seminar_skips_drafts() {
    let db = setup_test_db().await;
    let a = make_user(&db, "bob").await;
    let b = make_user(&db, "carol").await;
    let seminar = make_seminar(&db, "Rust 202", 2).await;

    insert_evaluation(&db, a.id, seminar.id, true).await;
    insert_evaluation(&db, b.id, seminar.id, false).await;

    let completed = evaluation::Model::completed_for_seminar(&db, seminar.id)
        .await
        .unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].user_id, a.id);
}

#[tokio::test]
async fn duplicate_evaluation_row_is_rejected() {
    let db = setup_test_db().await;
    let user = make_user(&db, "dave").await;
    let seminar = make_seminar(&db, "Rust 203", 2).await;

    insert_evaluation(&db, user.id, seminar.id, true).await;

    let dup = evaluation::ActiveModel {
        user_id: Set(user.id),
        seminar_id: Set(seminar.id),
        content_and_relevance: Set(1),
        presenters_effectiveness: Set(1),
        organization_and_structure: Set(1),
        materials_usefulness: Set(1),
        overall_satisfaction: Set(1),
        suggestions: Set(String::new()),
        is_completed: Set(false),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&db)
    .await;
    assert!(dup.is_err());
}

#[tokio::test]
async fn certificate_record_upsert_refreshes_instead_of_duplicating() {
    let db = setup_test_db().await;
    let user = make_user(&db, "eve").await;
    let seminar = make_seminar(&db, "Rust 204", 2).await;

    let first = CertRecordModel::upsert_sent(&db, seminar.id, user.id, "eve@example.com")
        .await
        .unwrap();
    let second = CertRecordModel::upsert_sent(&db, seminar.id, user.id, "eve2@example.com")
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.email, "eve2@example.com");

    let all = CertRecordModel::for_user(&db, user.id).await.unwrap();
    assert_eq!(all.len(), 1);
}
