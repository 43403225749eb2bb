pub mod message_db_service;
pub mod message_service;

pub use message_db_service::MessageDbService;
pub use message_service::MessageService;
