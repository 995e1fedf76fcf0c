//! PostgreSQL storage integration tests.
//!
//! Run with: POSTGRES_URI=postgres://... cargo test --test storage_postgres
//!
//! Skipped when POSTGRES_URI is not set.

use std::sync::Arc;
use std::time::Duration;

use mall::config::PostgresConfig;
use mall::model::User;
use mall::repository::{UserRepo, UserRepository};
use mall::storage::PostgresGateway;

fn postgres_uri() -> Option<String> {
    std::env::var("POSTGRES_URI").ok()
}

#[tokio::test]
async fn test_postgres_save_returns_generated_id() {
    let Some(uri) = postgres_uri() else {
        println!("POSTGRES_URI not set, skipping");
        return;
    };

    let gateway = PostgresGateway::connect(&PostgresConfig { uri }, Duration::from_secs(5))
        .await
        .expect("Failed to connect to PostgreSQL");
    let gateway = Arc::new(gateway);
    let repo = UserRepo::new(gateway.clone());

    let mut first = User::new("test_alice", "F");
    let mut second = User::new("test_bob'); DROP TABLE users;--", "M");
    repo.save(&mut first).await.unwrap();
    repo.save(&mut second).await.unwrap();

    let first_id = first.id().unwrap();
    let second_id = second.id().unwrap();
    assert!(second_id > first_id);

    let name: String = sqlx::query_scalar("SELECT name FROM users WHERE id = $1")
        .bind(second_id)
        .fetch_one(gateway.pool())
        .await
        .unwrap();
    assert_eq!(name, second.name());

    let _ = sqlx::query("DELETE FROM users WHERE name LIKE 'test_%'")
        .execute(gateway.pool())
        .await;
}
