//! Domain layer of Parlor.
//!
//! Models, pure rules (sanitizing, context building, message window) and the
//! traits implemented by the storage and gateway adapters.

pub mod clock;
pub mod config;
pub mod context;
pub mod conversation;
pub mod error;
pub mod gateway;
pub mod memory;
pub mod message;
pub mod project;
pub mod sanitize;
pub mod session;
pub mod settings;
pub mod store;

// Re-export common error type
pub use error::{ParlorError, Result};
