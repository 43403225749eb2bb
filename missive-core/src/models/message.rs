use serde::{Deserialize, Serialize};

/// Messaggio gestito dal percorso SQL diretto (tabella `messages`).
///
/// `id` può mancare in ingresso: il server ne genera uno al salvataggio.
/// In uscita viene sempre serializzato, come `null` se assente.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: Option<String>,
    pub text: String,
}

impl Message {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self { id: Some(id.into()), text: text.into() }
    }
}
