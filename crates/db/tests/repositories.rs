//! Integration tests for the PostgreSQL repositories.
//!
//! These need a live database (`DATABASE_URL`); run them with
//! `cargo test -p iotwatch-db -- --ignored`.

use assert_matches::assert_matches;
use iotwatch_core::pagination::PageRequest;
use iotwatch_db::models::reading::CreateReading;
use iotwatch_db::models::threshold::{CreateThreshold, ThresholdFilter};
use iotwatch_db::models::user::CreateUser;
use iotwatch_db::repositories::{ReadingRepo, ThresholdRepo, UserRepo};
use iotwatch_db::{list_page, ResourceStore, StoreError, UserStore};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_user(email: &str) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        name: "Ann".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
    }
}

fn new_threshold(value: f64, note: &str, user_id: Option<i64>) -> CreateThreshold {
    CreateThreshold {
        value,
        note: Some(note.to_string()),
        user_id,
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_user_create_and_lookup(pool: PgPool) {
    let repo = UserRepo::new(pool);
    let user = repo.create(&new_user("a@x.com")).await.unwrap();

    let by_email = repo.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(by_email.id, user.id);

    let by_id = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "a@x.com");

    assert!(repo.find_by_id(user.id + 1000).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_email_is_unique_violation(pool: PgPool) {
    let repo = UserRepo::new(pool.clone());
    repo.create(&new_user("dup@x.com")).await.unwrap();

    let err = repo.create(&new_user("dup@x.com")).await.unwrap_err();
    assert_matches!(
        err,
        StoreError::UniqueViolation { ref constraint } if constraint == "uq_users_email"
    );

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

// ---------------------------------------------------------------------------
// Readings
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_reading_numeric_columns_decode_as_f64(pool: PgPool) {
    let repo = ReadingRepo::new(pool);
    let row = repo
        .insert(&CreateReading {
            temperature: 27.25,
            threshold_value: Some(30.0),
        })
        .await
        .unwrap();

    assert_eq!(row.temperature, 27.25);
    assert_eq!(row.threshold_value, Some(30.0));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_reading_pagination(pool: PgPool) {
    let repo = ReadingRepo::new(pool);
    for t in 0..12 {
        repo.insert(&CreateReading {
            temperature: f64::from(t),
            threshold_value: None,
        })
        .await
        .unwrap();
    }

    let page = list_page(&repo, &(), PageRequest::new(Some(3), Some(5)))
        .await
        .unwrap();
    assert_eq!(page.total, 12);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 2);
    // Oldest rows land on the last page.
    assert_eq!(page.items[1].temperature, 0.0);
}

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_threshold_newest_first_and_filter(pool: PgPool) {
    let users = UserRepo::new(pool.clone());
    let ann = users.create(&new_user("ann@x.com")).await.unwrap();
    let bob = users.create(&new_user("bob@x.com")).await.unwrap();

    let repo = ThresholdRepo::new(pool);
    repo.insert(&new_threshold(20.0, "old", Some(ann.id)))
        .await
        .unwrap();
    repo.insert(&new_threshold(25.0, "bob", Some(bob.id)))
        .await
        .unwrap();
    repo.insert(&new_threshold(21.5, "test", Some(ann.id)))
        .await
        .unwrap();

    let all = list_page(&repo, &ThresholdFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.total, 3);
    assert_eq!(all.items[0].value, 21.5);
    assert_eq!(all.items[0].note.as_deref(), Some("test"));

    let ann_only = ThresholdFilter {
        user_id: Some(ann.id),
    };
    assert_eq!(repo.count(&ann_only).await.unwrap(), 2);
    let latest_bob = repo
        .latest(&ThresholdFilter {
            user_id: Some(bob.id),
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest_bob.value, 25.0);
}
