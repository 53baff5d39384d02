//! Session stores.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::{Result, SessionContext, SessionId};

/// Where session contexts live between requests.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// The stored context, if any.
    async fn load(&self, id: SessionId) -> Result<Option<SessionContext>>;

    /// Replace the stored context.
    async fn save(&self, id: SessionId, context: &SessionContext) -> Result<()>;

    /// Forget the session.
    async fn remove(&self, id: SessionId) -> Result<()>;
}

/// How long an untouched session lives when no TTL is configured.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug)]
struct Entry {
    context: SessionContext,
    touched: Instant,
}

/// Process-local [`SessionStore`].
///
/// An entry expires once it has gone `ttl` without being loaded or saved.
/// Expired entries read as absent and are swept on every save.
#[derive(Debug)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Entry>>,
    ttl: Duration,
}

impl MemorySessionStore {
    /// Create an empty store with [`DEFAULT_SESSION_TTL`].
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }

    /// Create an empty store whose entries expire after `ttl` of inactivity.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Number of stored sessions, including expired ones not yet swept.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no sessions are stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn is_live(&self, entry: &Entry, now: Instant) -> bool {
        now.duration_since(entry.touched) < self.ttl
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: SessionId) -> Result<Option<SessionContext>> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        match sessions.remove(&id) {
            Some(mut entry) if self.is_live(&entry, now) => {
                entry.touched = now;
                let context = entry.context.clone();
                sessions.insert(id, entry);
                Ok(Some(context))
            }
            _ => Ok(None),
        }
    }

    async fn save(&self, id: SessionId, context: &SessionContext) -> Result<()> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| self.is_live(entry, now));
        let swept = before - sessions.len();
        if swept > 0 {
            log::debug!("Swept {swept} expired sessions");
        }
        sessions.insert(
            id,
            Entry {
                context: context.clone(),
                touched: now,
            },
        );
        Ok(())
    }

    async fn remove(&self, id: SessionId) -> Result<()> {
        self.sessions.write().await.remove(&id);
        Ok(())
    }
}
