use crate::models::user::{Model as UserModel, Role};
use crate::test_utils::setup_test_db;
use crate::tests::make_user;

#[tokio::test]
async fn create_hashes_password() {
    let db = setup_test_db().await;
    let user = make_user(&db, "alice").await;

    assert_ne!(user.password_hash, "password123");
    assert!(user.verify_password("password123"));
    assert!(!user.verify_password("wrong"));
}

#[tokio::test]
async fn login_accepts_username_or_email() {
    let db = setup_test_db().await;
    make_user(&db, "bob").await;

    let by_username = UserModel::verify_credentials(&db, "bob", "password123")
        .await
        .unwrap();
    assert!(by_username.is_some());

    let by_email = UserModel::verify_credentials(&db, "bob@example.com", "password123")
        .await
        .unwrap();
    assert!(by_email.is_some());

    let bad = UserModel::verify_credentials(&db, "bob", "nope")
        .await
        .unwrap();
    assert!(bad.is_none());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let db = setup_test_db().await;
    make_user(&db, "carol").await;

    let dup = UserModel::create(
        &db,
        "carol2",
        "carol@example.com",
        "password123",
        "Carol",
        "Two",
        Role::Participant,
    )
    .await;
    assert!(dup.is_err());
}

#[tokio::test]
async fn notification_recipients_filters_opt_in_verified_participants() {
    use sea_orm::ActiveValue::Set;
    use sea_orm::{ActiveModelTrait, IntoActiveModel};

    let db = setup_test_db().await;

    // Unverified participant: excluded.
    make_user(&db, "dave").await;

    // Verified, opted-in participant: included.
    let eve = make_user(&db, "eve").await;
    let mut active = eve.into_active_model();
    active.is_email_verified = Set(true);
    active.update(&db).await.unwrap();

    // Verified participant who opted out: excluded.
    let frank = make_user(&db, "frank").await;
    let mut active = frank.into_active_model();
    active.is_email_verified = Set(true);
    active.email_notifications = Set(false);
    active.update(&db).await.unwrap();

    let recipients = UserModel::notification_recipients(&db).await.unwrap();
    assert_eq!(recipients.len(), 1);
    assert_eq!(recipients[0].username, "eve");
}

#[test]
fn role_parsing_defaults_to_participant() {
    let mut user = UserModel {
        id: 1,
        username: "x".into(),
        email: "x@example.com".into(),
        password_hash: String::new(),
        first_name: "A".into(),
        last_name: "B".into(),
        role: "admin".into(),
        is_email_verified: false,
        email_notifications: true,
        created_at: chrono::Utc::now(),
        updated_at: chrono::Utc::now(),
    };
    assert_eq!(user.role(), Role::Admin);
    assert!(user.is_admin());

    user.role = "garbage".into();
    assert_eq!(user.role(), Role::Participant);
    assert_eq!(user.full_name(), "A B");
}
