use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::info;

use super::error::AuthError;
use super::store::new_document_id;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub uid: String,
    pub anonymous: bool,
}

pub type SessionStream = BoxStream<'static, Option<Session>>;

#[async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_in_anonymously(&self) -> Result<Session, AuthError>;

    async fn sign_in_with_token(&self, token: &str) -> Result<Session, AuthError>;

    /// Yields the current session (or `None`) and then every change.
    fn on_session_change(&self) -> SessionStream;

    fn current_session(&self) -> Option<Session>;
}

/// Auth service that accepts any non-empty token and treats it as the uid.
pub struct MemoryAuth {
    session: watch::Sender<Option<Session>>,
}

impl Default for MemoryAuth {
    fn default() -> Self {
        Self {
            session: watch::channel(None).0,
        }
    }
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_out(&self) {
        self.session.send_replace(None);
    }

    fn set(&self, session: Session) -> Session {
        info!(uid = %session.uid, anonymous = session.anonymous, "session started");
        self.session.send_replace(Some(session.clone()));
        session
    }
}

#[async_trait]
impl AuthService for MemoryAuth {
    async fn sign_in_anonymously(&self) -> Result<Session, AuthError> {
        Ok(self.set(Session {
            uid: format!("anon-{}", new_document_id()),
            anonymous: true,
        }))
    }

    async fn sign_in_with_token(&self, token: &str) -> Result<Session, AuthError> {
        let token = token.trim();
        if token.is_empty() || token.chars().any(char::is_whitespace) {
            return Err(AuthError::InvalidToken);
        }
        Ok(self.set(Session {
            uid: token.to_string(),
            anonymous: false,
        }))
    }

    fn on_session_change(&self) -> SessionStream {
        WatchStream::new(self.session.subscribe()).boxed()
    }

    fn current_session(&self) -> Option<Session> {
        self.session.borrow().clone()
    }
}
