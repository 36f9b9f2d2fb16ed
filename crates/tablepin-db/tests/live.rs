//! Live integration tests against a real Postgres.
//!
//! Ignored by default: run with `cargo test -p tablepin-db -- --ignored`
//! after pointing `DATABASE_URL` at a scratch database.

use tablepin_db::{connect_pool_from_env, get_user_by_email, run_migrations, upsert_user_by_email};

#[tokio::test]
#[ignore = "requires a live Postgres via DATABASE_URL"]
async fn upsert_is_keyed_on_case_insensitive_email() {
    let pool = connect_pool_from_env().await.expect("pool connects");
    run_migrations(&pool).await.expect("migrations apply");

    let email = format!("case-test-{}@example.com", uuid_suffix());

    let first = upsert_user_by_email(&pool, "Dana", &email, "user")
        .await
        .expect("first upsert succeeds");

    let upper = email.to_uppercase();
    let second = upsert_user_by_email(&pool, "Dana Updated", &upper, "admin")
        .await
        .expect("second upsert succeeds");

    assert_eq!(first.id, second.id, "same row, matched case-insensitively");
    assert_eq!(second.name, "Dana Updated");
    assert_eq!(second.role, "admin");
    assert_eq!(first.created_at, second.created_at);
    assert!(second.updated_at >= first.updated_at);

    let fetched = get_user_by_email(&pool, &upper)
        .await
        .expect("lookup succeeds")
        .expect("row exists");
    assert_eq!(fetched.id, first.id);
}

fn uuid_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
