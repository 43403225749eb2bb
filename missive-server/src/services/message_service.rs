//! Accesso diretto con query SQL parametriche alla tabella `messages`.

use missive_core::{new_message_id, Message};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::info;

#[derive(Clone)]
pub struct MessageService {
    pool: SqlitePool,
}

// conversione esplicita riga -> Message
fn message_from_row(row: &SqliteRow) -> Result<Message, sqlx::Error> {
    Ok(Message {
        id: row.try_get("id")?,
        text: row.try_get("text")?,
    })
}

impl MessageService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Message>, sqlx::Error> {
        let rows = sqlx::query("SELECT * FROM messages")
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(message_from_row).collect()
    }

    /// Sempre una lista, vuota se l'id non esiste.
    pub async fn find_by_id(&self, id: &str) -> Result<Vec<Message>, sqlx::Error> {
        let rows = sqlx::query("SELECT * FROM messages WHERE id = ?")
            .bind(id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(message_from_row).collect()
    }

    /// Inserisce il messaggio generando l'id se manca. Un id già presente
    /// fa fallire l'INSERT con una violazione di vincolo: nessun upsert qui.
    pub async fn save(&self, message: Message) -> Result<String, sqlx::Error> {
        let id = message.id.unwrap_or_else(new_message_id);
        sqlx::query("INSERT INTO messages (id, text) VALUES (?, ?)")
            .bind(&id)
            .bind(&message.text)
            .execute(&self.pool)
            .await?;
        info!(id = %id, "message inserted");
        Ok(id)
    }
}
