//! Message domain module.
//!
//! - `model`: `Message` and `MessageRole`
//! - `window`: the capacity rule shared by conversations and sessions

mod model;
mod window;

pub use model::{Message, MessageRole};
pub use window::{MAX_MESSAGES, MessageWindow};
