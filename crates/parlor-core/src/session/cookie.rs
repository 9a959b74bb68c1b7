//! Session cookie issued to HTTP clients.

use super::model::SESSION_TTL_MS;

pub const SESSION_COOKIE_NAME: &str = "session_id";

/// The `session_id` cookie that binds a client to its session.
///
/// Always HttpOnly, SameSite=Strict, Path=/, with a Max-Age equal to the
/// session TTL. `Secure` is set in production.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub session_id: String,
    pub secure: bool,
}

impl SessionCookie {
    /// Returns a cookie only when the resolved session differs from the one
    /// the client sent.
    pub fn issue(resolved_id: &str, requested_id: Option<&str>, secure: bool) -> Option<Self> {
        if requested_id == Some(resolved_id) {
            return None;
        }
        Some(Self {
            session_id: resolved_id.to_string(),
            secure,
        })
    }

    pub fn max_age_secs(&self) -> i64 {
        SESSION_TTL_MS / 1000
    }

    /// Renders the value of a `Set-Cookie` header.
    pub fn header_value(&self) -> String {
        let mut value = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Strict",
            SESSION_COOKIE_NAME,
            self.session_id,
            self.max_age_secs()
        );
        if self.secure {
            value.push_str("; Secure");
        }
        value
    }
}
