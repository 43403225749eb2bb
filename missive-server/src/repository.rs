//! Repository generico con chiave stringa.
//!
//! [`Repository`] espone solo lettura e salvataggio; [`SqliteRepository`] lo implementa
//! per qualunque tipo che sappia convertirsi da/verso una riga tramite [`Entity`].
//! Il salvataggio è un upsert: una riga con la stessa chiave viene sovrascritta.

use async_trait::async_trait;
use missive_core::{new_message_id, StoredMessage};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::marker::PhantomData;

#[async_trait]
pub trait Repository<T>: Send + Sync {
    async fn find_all(&self) -> Result<Vec<T>, sqlx::Error>;
    async fn find_by_id(&self, id: &str) -> Result<Option<T>, sqlx::Error>;
    /// Inserisce o sostituisce; restituisce l'entità con la chiave effettivamente scritta.
    async fn save(&self, entity: T) -> Result<T, sqlx::Error>;
}

/// Mappatura esplicita tra un tipo e una tabella.
///
/// `COLUMNS[0]` deve essere `KEY`; `values()` restituisce le colonne restanti nello stesso ordine.
pub trait Entity: Sized + Send + Sync + Unpin + 'static {
    const TABLE: &'static str;
    const KEY: &'static str;
    const COLUMNS: &'static [&'static str];

    fn key(&self) -> Option<&str>;
    fn with_key(self, key: String) -> Self;
    fn values(&self) -> Vec<String>;
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error>;
}

impl Entity for StoredMessage {
    const TABLE: &'static str = "MESSAGESDB";
    const KEY: &'static str = "id";
    const COLUMNS: &'static [&'static str] = &["id", "text"];

    fn key(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn with_key(self, key: String) -> Self {
        Self { id: Some(key), ..self }
    }

    fn values(&self) -> Vec<String> {
        vec![self.text.clone()]
    }

    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            text: row.try_get("text")?,
        })
    }
}

pub struct SqliteRepository<E> {
    pool: SqlitePool,
    _entity: PhantomData<fn() -> E>,
}

impl<E> SqliteRepository<E> {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, _entity: PhantomData }
    }
}

fn select_sql<E: Entity>() -> String {
    format!("SELECT {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
}

fn upsert_sql<E: Entity>() -> String {
    let placeholders = vec!["?"; E::COLUMNS.len()].join(", ");
    let updates = E::COLUMNS
        .iter()
        .filter(|c| **c != E::KEY)
        .map(|c| format!("{c} = excluded.{c}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({}) ON CONFLICT({}) DO UPDATE SET {}",
        E::TABLE,
        E::COLUMNS.join(", "),
        placeholders,
        E::KEY,
        updates
    )
}

#[async_trait]
impl<E: Entity> Repository<E> for SqliteRepository<E> {
    async fn find_all(&self) -> Result<Vec<E>, sqlx::Error> {
        let sql = select_sql::<E>();
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(E::from_row).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<E>, sqlx::Error> {
        let sql = format!("{} WHERE {} = ?", select_sql::<E>(), E::KEY);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(E::from_row).transpose()
    }

    async fn save(&self, entity: E) -> Result<E, sqlx::Error> {
        let key = entity.key().map(str::to_owned).unwrap_or_else(new_message_id);
        let entity = entity.with_key(key.clone());

        let sql = upsert_sql::<E>();
        let mut query = sqlx::query(&sql).bind(key);
        for value in entity.values() {
            query = query.bind(value);
        }
        query.execute(&self.pool).await?;
        Ok(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_sql_updates_every_non_key_column() {
        assert_eq!(
            upsert_sql::<StoredMessage>(),
            "INSERT INTO MESSAGESDB (id, text) VALUES (?, ?) ON CONFLICT(id) DO UPDATE SET text = excluded.text"
        );
    }

    #[test]
    fn select_sql_lists_columns() {
        assert_eq!(select_sql::<StoredMessage>(), "SELECT id, text FROM MESSAGESDB");
    }

    #[test]
    fn with_key_keeps_text() {
        let m = StoredMessage { id: None, text: "hi".into() }.with_key("k".into());
        assert_eq!(m, StoredMessage::new("k", "hi"));
        assert_eq!(m.values(), vec!["hi".to_string()]);
    }
}
