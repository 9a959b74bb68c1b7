//! Session domain module.
//!
//! - `model`: `Session` and its lifetime limits
//! - `cookie`: the `session_id` cookie handed to HTTP clients

mod cookie;
mod model;

pub use cookie::{SESSION_COOKIE_NAME, SessionCookie};
pub use model::{MAX_SESSIONS, SESSION_TTL_MS, Session};
