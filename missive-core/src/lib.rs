//! missive-core: tipi condivisi dal server e dai test (modelli, errore JSON, utility).
//! Niente I/O e niente dipendenze dal database.

pub mod models;
pub mod error;
pub mod utils;

// Re-export utili per ridurre i percorsi nel crate server
pub use error::Error;
pub use models::{message::Message, stored_message::StoredMessage};
pub use utils::{new_message_id, to_list};
