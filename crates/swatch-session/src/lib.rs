//! Session context for Swatch.
//!
//! Provides:
//! - [`SessionContext`]: the per-browser state bridging sequential requests
//! - [`SessionStore`]: trait for where contexts live between requests
//! - [`MemorySessionStore`] and, with the `redis` feature, `RedisSessionStore`
//! - [`CookieSigner`]: MAC-protected session cookie values
//! - [`SessionLayer`] / [`SessionService`]: Tower middleware that loads and saves contexts
//! - [`Session`]: the handler-facing handle and extractor

mod context;
mod cookie;
mod error;
mod middleware;
mod store;

#[cfg(feature = "redis")]
mod redis_store;

use std::sync::Arc;
use std::time::Duration;

use swatch_core::{SessionBackend, SessionConfig};

pub use context::SessionContext;
pub use cookie::{CookieSigner, SessionId};
pub use error::{Error, Result};
pub use middleware::{Session, SessionLayer, SessionService};
pub use store::{DEFAULT_SESSION_TTL, MemorySessionStore, SessionStore};

#[cfg(feature = "redis")]
pub use redis_store::RedisSessionStore;

/// Build the session store selected by `config`.
pub async fn open_session_store(config: &SessionConfig) -> Result<Arc<dyn SessionStore>> {
    match config.backend {
        SessionBackend::Memory => {
            log::info!("Using in-memory session store");
            Ok(Arc::new(MemorySessionStore::with_ttl(Duration::from_secs(
                config.ttl_secs,
            ))))
        }
        SessionBackend::Redis => open_redis(config).await,
    }
}

#[cfg(feature = "redis")]
async fn open_redis(config: &SessionConfig) -> Result<Arc<dyn SessionStore>> {
    let url = config
        .redis_url
        .as_deref()
        .ok_or(Error::MissingSetting("session.redis_url"))?;
    log::info!("Using redis session store");
    Ok(Arc::new(RedisSessionStore::connect(url, config.ttl_secs).await?))
}

#[cfg(not(feature = "redis"))]
async fn open_redis(_config: &SessionConfig) -> Result<Arc<dyn SessionStore>> {
    Err(Error::BackendUnavailable("redis"))
}

/// Build the cookie signer for `config`, falling back to a random key.
pub fn cookie_signer(config: &SessionConfig) -> CookieSigner {
    match config.secret.as_deref() {
        Some(secret) if !secret.is_empty() => CookieSigner::from_secret(secret),
        _ => {
            log::warn!("No session secret configured; sessions will not survive a restart");
            CookieSigner::random()
        }
    }
}
