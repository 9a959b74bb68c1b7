//! Session resolution for cookie-bound clients.

use std::sync::Arc;

use parlor_core::Result;
use parlor_core::session::SessionCookie;
use parlor_infrastructure::SessionStore;

/// The session a request runs under, plus the cookie to send back if the
/// client needs a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSession {
    pub session_id: String,
    pub cookie: Option<SessionCookie>,
}

/// Use case that maps a client's `session_id` cookie onto a live session.
pub struct SessionService {
    store: Arc<SessionStore>,
    secure_cookies: bool,
}

impl SessionService {
    /// `secure_cookies` sets the `Secure` attribute (production).
    pub fn new(store: Arc<SessionStore>, secure_cookies: bool) -> Self {
        Self {
            store,
            secure_cookies,
        }
    }

    pub async fn resolve(&self, requested: Option<&str>) -> Result<ResolvedSession> {
        let session = self.store.get_or_create_session(requested).await?;
        let cookie = SessionCookie::issue(&session.id, requested, self.secure_cookies);
        if cookie.is_some() {
            tracing::debug!(session_id = %session.id, "Issued session cookie");
        }
        Ok(ResolvedSession {
            session_id: session.id,
            cookie,
        })
    }
}
