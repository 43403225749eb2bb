//! Accesso tramite il repository generico alla tabella `MESSAGESDB`.

use missive_core::{to_list, StoredMessage};
use std::sync::Arc;
use tracing::info;

use crate::repository::Repository;

#[derive(Clone)]
pub struct MessageDbService {
    repo: Arc<dyn Repository<StoredMessage>>,
}

impl MessageDbService {
    pub fn new(repo: Arc<dyn Repository<StoredMessage>>) -> Self {
        Self { repo }
    }

    pub async fn find_all(&self) -> Result<Vec<StoredMessage>, sqlx::Error> {
        self.repo.find_all().await
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Vec<StoredMessage>, sqlx::Error> {
        Ok(to_list(self.repo.find_by_id(id).await?))
    }

    /// Upsert: a parità di id vince l'ultimo testo salvato.
    pub async fn save(&self, message: StoredMessage) -> Result<StoredMessage, sqlx::Error> {
        let saved = self.repo.save(message).await?;
        info!(id = ?saved.id, "stored message saved");
        Ok(saved)
    }
}
