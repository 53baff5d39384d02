//! Redis-backed session store.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::{Result, SessionContext, SessionId, SessionStore};

/// [`SessionStore`] keeping each context as a JSON string with a TTL.
///
/// Loads and saves both refresh the TTL, so a session expires only after
/// `ttl_secs` without a request.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
    ttl_secs: u64,
}

impl RedisSessionStore {
    /// Connect to `url`.
    pub async fn connect(url: &str, ttl_secs: u64) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn, ttl_secs })
    }

    fn key(id: SessionId) -> String {
        format!("swatch:session:{id}")
    }
}

/// `GETEX key EX ttl`: read a context and push its expiry out in one step.
fn load_cmd(id: SessionId, ttl_secs: u64) -> redis::Cmd {
    let mut cmd = redis::cmd("GETEX");
    cmd.arg(RedisSessionStore::key(id)).arg("EX").arg(ttl_secs);
    cmd
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: SessionId) -> Result<Option<SessionContext>> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = load_cmd(id, self.ttl_secs).query_async(&mut conn).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, id: SessionId, context: &SessionContext) -> Result<()> {
        let mut conn = self.conn.clone();
        let json = serde_json::to_string(context)?;
        let _: () = conn.set_ex(Self::key(id), json, self.ttl_secs).await?;
        Ok(())
    }

    async fn remove(&self, id: SessionId) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(Self::key(id)).await?;
        Ok(())
    }
}
