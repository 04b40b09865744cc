//! PostgreSQL store tests. Each test gets a fresh migrated database from
//! `#[sqlx::test]`, which needs `DATABASE_URL` pointing at a server the test
//! user may create databases on.

use chrono::{Duration, Utc};
use link_shortener::domain::entities::NewLink;
use link_shortener::domain::repositories::LinkRepository;
use link_shortener::error::AppError;
use link_shortener::infrastructure::persistence::PgLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, url: &str) -> NewLink {
    NewLink {
        code: code.to_string(),
        target_url: url.to_string(),
    }
}

#[sqlx::test]
async fn test_insert_link(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo
        .insert(new_link("test123", "https://example.com"))
        .await
        .unwrap();

    assert_eq!(link.code, "test123");
    assert_eq!(link.target_url, "https://example.com");
    assert_eq!(link.total_clicks, 0);
    assert!(link.last_clicked_at.is_none());
    assert_eq!(link.created_at, link.updated_at);
}

#[sqlx::test]
async fn test_insert_duplicate_code_conflicts(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("dup1234", "https://example.com"))
        .await
        .unwrap();
    let result = repo
        .insert(new_link("dup1234", "https://other.example.com"))
        .await;

    assert!(matches!(result, Err(AppError::CodeConflict { .. })));
}

#[sqlx::test]
async fn test_find_by_code(pool: PgPool) {
    sqlx::query("INSERT INTO links (code, target_url) VALUES ($1, $2)")
        .bind("abc123")
        .bind("https://example.com")
        .execute(&pool)
        .await
        .unwrap();

    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo.find_by_code("abc123").await.unwrap();
    assert_eq!(link.unwrap().target_url, "https://example.com");

    assert!(repo.find_by_code("nope123").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_list_all_newest_first(pool: PgPool) {
    let now = Utc::now();
    for (code, age_minutes) in [("oldest1", 30), ("middle1", 20), ("newest1", 10)] {
        sqlx::query("INSERT INTO links (code, target_url, created_at) VALUES ($1, $2, $3)")
            .bind(code)
            .bind("https://example.com")
            .bind(now - Duration::minutes(age_minutes))
            .execute(&pool)
            .await
            .unwrap();
    }

    let repo = PgLinkRepository::new(Arc::new(pool));
    let codes: Vec<String> = repo
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.code)
        .collect();

    assert_eq!(codes, vec!["newest1", "middle1", "oldest1"]);
}

#[sqlx::test]
async fn test_delete_by_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.insert(new_link("del1234", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.delete_by_code("del1234").await.unwrap());
    assert!(!repo.delete_by_code("del1234").await.unwrap());
    assert!(repo.find_by_code("del1234").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_increment_clicks(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.insert(new_link("clk1234", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.increment_clicks("clk1234").await.unwrap());
    assert!(repo.increment_clicks("clk1234").await.unwrap());
    assert!(!repo.increment_clicks("missing").await.unwrap());

    let link = repo.find_by_code("clk1234").await.unwrap().unwrap();
    assert_eq!(link.total_clicks, 2);
    assert!(link.last_clicked_at.is_some());
}

#[sqlx::test]
async fn test_concurrent_increments_are_not_lost(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    repo.insert(new_link("race123", "https://example.com"))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..20 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.increment_clicks("race123").await.unwrap()
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap());
    }

    let link = repo.find_by_code("race123").await.unwrap().unwrap();
    assert_eq!(link.total_clicks, 20);
}

#[sqlx::test]
async fn test_store_click_count_never_decreases(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    repo.insert(new_link("fall123", "https://example.com"))
        .await
        .unwrap();

    assert!(repo.store_click_count("fall123", 5, Utc::now()).await.unwrap());
    assert!(repo.store_click_count("fall123", 3, Utc::now()).await.unwrap());

    let link = repo.find_by_code("fall123").await.unwrap().unwrap();
    assert_eq!(link.total_clicks, 5);
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    assert!(repo.ping().await.is_ok());
}
