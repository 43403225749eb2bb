pub mod message;
pub mod stored_message;

// Re-export per comodità
pub use message::Message;
pub use stored_message::StoredMessage;
