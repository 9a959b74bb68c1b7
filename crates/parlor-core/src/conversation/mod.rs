//! Conversation domain module.

mod model;
mod repository;

pub use model::{
    AUTO_TITLE_CHARS, Conversation, ConversationSummary, ConversationUpdate, DEFAULT_TITLE,
    auto_title,
};
pub use repository::ConversationRepository;
