use anyhow::Result;
use async_trait::async_trait;
use missive_core::{Message, StoredMessage};
use missive_server::repository::{Repository, SqliteRepository};
use missive_server::services::{MessageDbService, MessageService};
use missive_server::{connect_pool, run_migrations, sqlite_url_for_path};
use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

async fn test_pool() -> Result<(SqlitePool, TempDir)> {
    let td = TempDir::new()?;
    let url = sqlite_url_for_path(&td.path().join("missive.db"))?;
    let pool = connect_pool(&url, 2).await?;
    run_migrations(&pool).await?;
    Ok((pool, td))
}

#[tokio::test]
async fn message_service_save_returns_written_id() -> Result<()> {
    let (pool, _td) = test_pool().await?;
    let service = MessageService::new(pool);

    let given = service.save(Message::new("given", "a")).await?;
    let generated = service.save(Message { id: None, text: "b".into() }).await?;

    assert_eq!(given, "given");
    assert_ne!(generated, "given");
    assert_eq!(service.find_by_id(&generated).await?, vec![Message::new(generated.clone(), "b")]);
    assert_eq!(service.find_all().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn message_service_duplicate_is_unique_violation() -> Result<()> {
    let (pool, _td) = test_pool().await?;
    let service = MessageService::new(pool);

    service.save(Message::new("1", "a")).await?;
    let err = service.save(Message::new("1", "b")).await.expect_err("duplicate must fail");

    match err {
        sqlx::Error::Database(db) => assert!(db.is_unique_violation()),
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[tokio::test]
async fn sqlite_repository_find_by_id_and_upsert() -> Result<()> {
    let (pool, _td) = test_pool().await?;
    let repo = SqliteRepository::<StoredMessage>::new(pool);

    assert_eq!(repo.find_by_id("k").await?, None);

    repo.save(StoredMessage::new("k", "v1")).await?;
    let saved = repo.save(StoredMessage::new("k", "v2")).await?;

    assert_eq!(saved, StoredMessage::new("k", "v2"));
    assert_eq!(repo.find_by_id("k").await?, Some(StoredMessage::new("k", "v2")));
    assert_eq!(repo.find_all().await?, vec![StoredMessage::new("k", "v2")]);
    Ok(())
}

#[tokio::test]
async fn sqlite_repository_assigns_key_when_missing() -> Result<()> {
    let (pool, _td) = test_pool().await?;
    let repo = SqliteRepository::<StoredMessage>::new(pool);

    let saved = repo.save(StoredMessage { id: None, text: "anon".into() }).await?;
    let id = saved.id.clone().expect("key assigned");

    assert_eq!(repo.find_by_id(&id).await?, Some(saved));
    Ok(())
}

// Repository in memoria: verifica che il servizio dipenda solo dal trait
#[derive(Default)]
struct FakeRepository {
    rows: Mutex<Vec<StoredMessage>>,
}

#[async_trait]
impl Repository<StoredMessage> for FakeRepository {
    async fn find_all(&self) -> Result<Vec<StoredMessage>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredMessage>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().iter().find(|m| m.id.as_deref() == Some(id)).cloned())
    }

    async fn save(&self, entity: StoredMessage) -> Result<StoredMessage, sqlx::Error> {
        let mut rows = self.rows.lock().unwrap();
        rows.retain(|m| m.id != entity.id);
        rows.push(entity.clone());
        Ok(entity)
    }
}

#[tokio::test]
async fn db_service_adapts_optional_to_list() -> Result<()> {
    let service = MessageDbService::new(Arc::new(FakeRepository::default()));

    assert!(service.find_by_id("missing").await?.is_empty());

    service.save(StoredMessage::new("a", "x")).await?;
    assert_eq!(service.find_by_id("a").await?, vec![StoredMessage::new("a", "x")]);
    assert_eq!(service.find_all().await?.len(), 1);
    Ok(())
}
