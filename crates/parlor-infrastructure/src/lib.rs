//! Storage and configuration adapters for Parlor.

pub mod config_service;
pub mod json_file_store;
pub mod paths;
pub mod session_store;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::json_file_store::JsonFileStore;
pub use crate::paths::ParlorPaths;
pub use crate::session_store::SessionStore;
