//! Application layer for Parlor.
//!
//! Use cases that a request boundary (HTTP handlers or the CLI) calls. They
//! coordinate the domain rules with whichever store and gateway were wired
//! in at start-up.

pub mod backup_service;
pub mod chat_usecase;
pub mod conversation_service;
pub mod memory_service;
pub mod session_service;
pub mod settings_service;

#[cfg(test)]
mod test_support;

pub use backup_service::{BackupFile, BackupService, backup_file_name};
pub use chat_usecase::{ChatReply, ChatUseCase};
pub use conversation_service::{ConversationService, ProjectService};
pub use memory_service::MemoryService;
pub use session_service::{ResolvedSession, SessionService};
pub use settings_service::SettingsService;
