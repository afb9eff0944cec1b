use chrono::{Duration, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, IntoActiveModel};

use crate::models::email_change_request::{self, MAX_ATTEMPTS};
use crate::models::email_verification_token;
use crate::models::password_reset_token;
use crate::test_utils::setup_test_db;
use crate::tests::make_user;

#[tokio::test]
async fn verification_token_round_trip() {
    let db = setup_test_db().await;
    let user = make_user(&db, "alice").await;

    let token = email_verification_token::Model::create(&db, user.id, 60)
        .await
        .unwrap();
    assert_eq!(token.token.len(), 32);

    let found = email_verification_token::Model::find_valid_token(&db, &token.token)
        .await
        .unwrap();
    assert!(found.is_some());

    token.mark_as_used(&db).await.unwrap();
    let gone = email_verification_token::Model::find_valid_token(&db, &token.token)
        .await
        .unwrap();
    assert!(gone.is_none());
}

#[tokio::test]
async fn expired_reset_token_is_invalid() {
    let db = setup_test_db().await;
    let user = make_user(&db, "bob").await;

    let token = password_reset_token::Model::create(&db, user.id, 15)
        .await
        .unwrap();

    let mut active = token.clone().into_active_model();
    active.expires_at = Set(Utc::now() - Duration::minutes(1));
    active.update(&db).await.unwrap();

    let found = password_reset_token::Model::find_valid_token(&db, &token.token)
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn reset_request_rate_limit_counts_last_hour() {
    let db = setup_test_db().await;
    let user = make_user(&db, "carol").await;

    for _ in 0..3 {
        password_reset_token::Model::create(&db, user.id, 15)
            .await
            .unwrap();
    }
    let count = password_reset_token::Model::count_recent_for_user(&db, user.id)
        .await
        .unwrap();
    assert_eq!(count, 3);
}

#[tokio::test]
async fn email_change_code_is_six_digits_and_burns_after_max_attempts() {
    let db = setup_test_db().await;
    let user = make_user(&db, "dave").await;

    let req = email_change_request::Model::create(&db, user.id, "new@example.com", 10)
        .await
        .unwrap();
    assert_eq!(req.verification_code.len(), 6);
    assert!(req.verification_code.chars().all(|c| c.is_ascii_digit()));

    for _ in 0..MAX_ATTEMPTS {
        let active = email_change_request::Model::find_active_for_user(&db, user.id)
            .await
            .unwrap()
            .expect("request should still be active");
        active.register_failed_attempt(&db).await.unwrap();
    }

    let burned = email_change_request::Model::find_active_for_user(&db, user.id)
        .await
        .unwrap();
    assert!(burned.is_none());
}

#[tokio::test]
async fn used_email_change_request_is_inactive() {
    let db = setup_test_db().await;
    let user = make_user(&db, "eve").await;

    let req = email_change_request::Model::create(&db, user.id, "new@example.com", 10)
        .await
        .unwrap();
    req.mark_as_used(&db).await.unwrap();

    let found = email_change_request::Model::find_active_for_user(&db, user.id)
        .await
        .unwrap();
    assert!(found.is_none());
}
