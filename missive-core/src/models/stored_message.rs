use serde::{Deserialize, Serialize};

/// Messaggio gestito dal repository generico (tabella `MESSAGESDB`, chiave `id`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
}

impl StoredMessage {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: Some(id.into()), text: text.into() }
    }
}
