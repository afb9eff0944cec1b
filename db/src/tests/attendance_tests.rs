use chrono::Utc;

use crate::models::attendance::{Model as AttendanceModel, ScanAction, ScanError};
use crate::models::seminar_qr_code::Model as QrModel;
use crate::test_utils::setup_test_db;
use crate::tests::{make_seminar, make_user};

#[tokio::test]
async fn is_present_requires_both_timestamps() {
    let db = setup_test_db().await;
    let user = make_user(&db, "alice").await;
    let seminar = make_seminar(&db, "Rust 101", 2).await;

    let row = AttendanceModel::get_or_create(&db, user.id, seminar.id)
        .await
        .unwrap();
    assert!(!row.is_present);

    let row = row
        .apply_scan(&db, ScanAction::CheckIn, Utc::now())
        .await
        .unwrap();
    assert!(row.check_in.is_some());
    assert!(!row.is_present);

    let row = row
        .apply_scan(&db, ScanAction::CheckOut, Utc::now())
        .await
        .unwrap();
    assert!(row.check_out.is_some());
    assert!(row.is_present);
}

#[tokio::test]
async fn repeated_scan_is_rejected() {
    let db = setup_test_db().await;
    let user = make_user(&db, "bob").await;
    let seminar = make_seminar(&db, "Rust 102", 2).await;

    let row = AttendanceModel::get_or_create(&db, user.id, seminar.id)
        .await
        .unwrap();
    let row = row
        .apply_scan(&db, ScanAction::CheckIn, Utc::now())
        .await
        .unwrap();

    let err = row
        .apply_scan(&db, ScanAction::CheckIn, Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, ScanError::AlreadyCheckedIn));
}

#[tokio::test]
async fn get_or_create_returns_existing_row() {
    let db = setup_test_db().await;
    let user = make_user(&db, "carol").await;
    let seminar = make_seminar(&db, "Rust 103", 2).await;

    let first = AttendanceModel::get_or_create(&db, user.id, seminar.id)
        .await
        .unwrap();
    let second = AttendanceModel::get_or_create(&db, user.id, seminar.id)
        .await
        .unwrap();
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn qr_tokens_are_issued_once_and_reused() {
    let db = setup_test_db().await;
    let seminar = make_seminar(&db, "Rust 104", 2).await;

    let first = QrModel::get_or_create(&db, seminar.id).await.unwrap();
    let second = QrModel::get_or_create(&db, seminar.id).await.unwrap();

    assert_eq!(first.qr_token_check_in, second.qr_token_check_in);
    assert_eq!(first.qr_token_check_out, second.qr_token_check_out);
    assert_ne!(first.qr_token_check_in, first.qr_token_check_out);
    // UUID v4 string shape
    assert_eq!(first.qr_token_check_in.len(), 36);
}

#[tokio::test]
async fn present_participants_excludes_admins() {
    use sea_orm::ActiveValue::Set;
    use sea_orm::{ActiveModelTrait, IntoActiveModel};

    let db = setup_test_db().await;
    let seminar = make_seminar(&db, "Rust 105", 2).await;

    let participant = make_user(&db, "dave").await;
    let admin = make_user(&db, "eve").await;
    let mut active = admin.clone().into_active_model();
    active.role = Set("admin".to_string());
    active.update(&db).await.unwrap();

    for uid in [participant.id, admin.id] {
        let row = AttendanceModel::get_or_create(&db, uid, seminar.id)
            .await
            .unwrap();
        let row = row
            .apply_scan(&db, ScanAction::CheckIn, Utc::now())
            .await
            .unwrap();
        row.apply_scan(&db, ScanAction::CheckOut, Utc::now())
            .await
            .unwrap();
    }

    let present = AttendanceModel::present_participants(&db, seminar.id)
        .await
        .unwrap();
    assert_eq!(present.len(), 1);
    assert_eq!(present[0].username, "dave");
}

#[test]
fn scan_window_closes_after_grace_period() {
    use chrono::Duration;

    let date_end = Utc::now();
    assert!(AttendanceModel::scan_window_open(
        date_end,
        date_end + Duration::minutes(74)
    ));
    assert!(!AttendanceModel::scan_window_open(
        date_end,
        date_end + Duration::minutes(76)
    ));
    // a scan during the seminar itself is always in the window
    assert!(AttendanceModel::scan_window_open(
        date_end,
        date_end - Duration::hours(1)
    ));
}

#[test]
fn scan_action_parses_known_values_only() {
    assert_eq!(ScanAction::parse("check_in"), Some(ScanAction::CheckIn));
    assert_eq!(ScanAction::parse("check_out"), Some(ScanAction::CheckOut));
    assert_eq!(ScanAction::parse("checkin"), None);
}
