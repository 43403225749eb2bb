pub mod ids;
pub mod list;

pub use ids::new_message_id;
pub use list::to_list;
